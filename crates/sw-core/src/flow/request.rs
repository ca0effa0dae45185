use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Numeric code correlating an external activity result with the page that
/// started the activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestCode(pub i32);

impl RequestCode {
    pub const SETUP_WIFI: RequestCode = RequestCode(0);
    pub const SETUP_CAPTIVE_PORTAL: RequestCode = RequestCode(4);
    pub const SETUP_BLUETOOTH: RequestCode = RequestCode(5);
    pub const UNLOCK: RequestCode = RequestCode(6);
    pub const SETUP_FINGERPRINT: RequestCode = RequestCode(7);
    pub const SETUP_LOCKSCREEN: RequestCode = RequestCode(9);

    pub fn value(self) -> i32 {
        self.0
    }
}

impl Display for RequestCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result reported by an external activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityOutcome {
    Ok,
    Canceled,
    /// The activity could not be started or crashed.
    Failed,
}

impl ActivityOutcome {
    pub fn is_ok(self) -> bool {
        matches!(self, ActivityOutcome::Ok)
    }
}
