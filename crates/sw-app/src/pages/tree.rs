use sw_core::{Page, PageList, PageListError, Position};

use super::{
    FingerprintPage, FinishPage, LockscreenPage, MobileDataPage, PageEnv, ServicesPage,
    WelcomePage, WifiPage,
};

/// Keys of the pages in the default tree.
pub mod keys {
    pub const WELCOME: &str = "welcome";
    pub const WIFI: &str = "wifi";
    pub const MOBILE_DATA: &str = "mobile_data";
    pub const LOCKSCREEN: &str = "lockscreen";
    pub const FINGERPRINT: &str = "fingerprint";
    pub const SERVICES: &str = "services";
    pub const FINISH: &str = "finish";
}

/// Builds the standard page sequence.
pub fn default_page_tree(env: &PageEnv) -> Result<PageList, PageListError> {
    let mut position: Position = -1;
    let mut next = || {
        position += 1;
        position
    };

    PageList::build([
        Page::new(keys::WELCOME, next(), WelcomePage)
            .with_title("Welcome")
            .with_icon("ic_welcome")
            .required(),
        Page::new(keys::WIFI, next(), WifiPage::new(env.hardware.clone()))
            .with_title("Connect to Wi-Fi")
            .with_icon("ic_wifi"),
        Page::new(
            keys::MOBILE_DATA,
            next(),
            MobileDataPage::new(env.hardware.clone(), env.radio.clone()),
        )
        .with_title("Mobile data")
        .with_icon("ic_mobile_data"),
        Page::new(keys::LOCKSCREEN, next(), LockscreenPage::new())
            .with_title("Protect your phone")
            .with_icon("ic_lock"),
        Page::new(
            keys::FINGERPRINT,
            next(),
            FingerprintPage::new(env.hardware.clone()),
        )
        .with_title("Fingerprint")
        .with_icon("ic_fingerprint"),
        Page::new(
            keys::SERVICES,
            next(),
            ServicesPage::new(env.hardware.clone(), env.services.clone()),
        )
        .with_title("Services")
        .with_icon("ic_services"),
        Page::new(keys::FINISH, next(), FinishPage::default())
            .with_title("All set")
            .with_icon("ic_finish")
            .required(),
    ])
}
