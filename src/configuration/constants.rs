pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod report {
    use std::time::Duration;

    pub const TITLE_ONGOING: &'static str = "Test Ongoing";
    pub const TITLE_DONE: &'static str = "Test Done";

    /// Meta-refresh interval while the run is still producing results.
    pub const REFRESH_ONGOING: &'static str = "3";
    /// Effectively freezes the page once the run is done.
    pub const REFRESH_FROZEN: &'static str = "99999999";

    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
}
