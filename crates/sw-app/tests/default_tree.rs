mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{harness_with, key_of};
use sw_app::pages::{
    default_page_tree, keys, load_services_defaults, PageEnv, ServicesDefaults,
};
use sw_core::ports::HardwareFeature;
use sw_core::settings::keys::{
    DISABLE_NAV_KEYS, KEY_APPLY_DEFAULT_THEME, KEY_FINGERPRINT_ENROLLED, KEY_LOCKSCREEN_SET,
    KEY_MOBILE_DATA_ENABLED, KEY_PRIVACY_GUARD, KEY_SEND_METRICS, USER_SETUP_COMPLETE,
};
use sw_core::{
    ActivityOutcome, AppConfig, FlowPhase, PageInput, RequestCode, SettingValue,
    SettingsAccumulator,
};
use sw_infra::{InMemorySettingsStore, ReadinessGate, StaticHardwareCapabilities};

fn env(
    supported: &[HardwareFeature],
    radio: Arc<ReadinessGate>,
    services: ServicesDefaults,
) -> PageEnv {
    PageEnv {
        hardware: Arc::new(StaticHardwareCapabilities::new(
            supported.iter().copied(),
            std::iter::empty(),
        )),
        radio,
        services,
    }
}

fn full_env() -> PageEnv {
    env(
        &[
            HardwareFeature::Wifi,
            HardwareFeature::Telephony,
            HardwareFeature::Fingerprint,
            HardwareFeature::KeyDisable,
        ],
        Arc::new(ReadinessGate::radio()),
        ServicesDefaults {
            default_theme: "org.lineageos.theme.dark".into(),
            theme_checked_by_default: true,
            ..ServicesDefaults::default()
        },
    )
}

#[tokio::test]
async fn minimal_device_only_sees_required_and_generic_pages() {
    let tree = default_page_tree(&env(
        &[],
        Arc::new(ReadinessGate::radio()),
        ServicesDefaults::default(),
    ))
    .unwrap();
    let h = harness_with(tree, SettingsAccumulator::new());

    h.controller.start().await.unwrap();
    while h.controller.phase().await == FlowPhase::Running {
        h.controller.next_page().await.unwrap();
    }

    assert_eq!(
        h.events.loaded(),
        vec![keys::WELCOME, keys::LOCKSCREEN, keys::SERVICES, keys::FINISH]
    );
    assert_eq!(h.store.value(KEY_SEND_METRICS), Some(SettingValue::Bool(true)));
    assert!(h.store.value(KEY_APPLY_DEFAULT_THEME).is_none());
    assert!(h.store.value(DISABLE_NAV_KEYS).is_none());
    assert_eq!(h.store.value(USER_SETUP_COMPLETE), Some(SettingValue::Int(1)));
}

#[tokio::test]
async fn full_device_walk_with_activity_results() {
    let h = harness_with(default_page_tree(&full_env()).unwrap(), SettingsAccumulator::new());

    h.controller.start().await.unwrap();
    let snapshot = h.controller.next_page().await.unwrap();
    assert_eq!(key_of(&snapshot), Some(keys::WIFI));

    let snapshot = h
        .controller
        .deliver_activity_result(RequestCode::SETUP_WIFI, ActivityOutcome::Ok)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(key_of(&snapshot), Some(keys::MOBILE_DATA));

    let snapshot = h.controller.next_page().await.unwrap();
    assert_eq!(key_of(&snapshot), Some(keys::LOCKSCREEN));

    let snapshot = h
        .controller
        .deliver_activity_result(RequestCode::SETUP_LOCKSCREEN, ActivityOutcome::Ok)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(key_of(&snapshot), Some(keys::FINGERPRINT));

    let snapshot = h
        .controller
        .deliver_activity_result(RequestCode::SETUP_FINGERPRINT, ActivityOutcome::Ok)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(key_of(&snapshot), Some(keys::SERVICES));

    assert!(h
        .controller
        .page_input(
            keys::SERVICES,
            PageInput::SetToggle {
                key: KEY_SEND_METRICS.into(),
                checked: false,
            },
        )
        .await
        .unwrap());
    assert!(h
        .controller
        .page_input(
            keys::SERVICES,
            PageInput::SetToggle {
                key: DISABLE_NAV_KEYS.into(),
                checked: true,
            },
        )
        .await
        .unwrap());

    h.controller.next_page().await.unwrap();
    let snapshot = h.controller.finish_setup().await.unwrap();
    assert_eq!(snapshot.phase, FlowPhase::Finished);

    assert_eq!(h.store.value(KEY_LOCKSCREEN_SET), Some(SettingValue::Bool(true)));
    assert_eq!(
        h.store.value(KEY_FINGERPRINT_ENROLLED),
        Some(SettingValue::Bool(true))
    );
    assert_eq!(h.store.value(KEY_SEND_METRICS), Some(SettingValue::Bool(false)));
    assert_eq!(
        h.store.value(KEY_APPLY_DEFAULT_THEME),
        Some(SettingValue::Bool(true))
    );
    assert_eq!(h.store.value(DISABLE_NAV_KEYS), Some(SettingValue::Bool(true)));
    assert_eq!(h.store.value(KEY_PRIVACY_GUARD), Some(SettingValue::Bool(false)));
    assert!(h.status.has_completed());
}

#[tokio::test]
async fn input_for_page_that_is_not_current_is_ignored() {
    let h = harness_with(default_page_tree(&full_env()).unwrap(), SettingsAccumulator::new());
    h.controller.start().await.unwrap();

    let handled = h
        .controller
        .page_input(
            keys::SERVICES,
            PageInput::SetToggle {
                key: KEY_SEND_METRICS.into(),
                checked: false,
            },
        )
        .await
        .unwrap();

    assert!(!handled);
}

#[tokio::test(start_paused = true)]
async fn mobile_data_toggle_waits_for_radio_timeout() {
    let radio = Arc::new(ReadinessGate::radio());
    radio.arm(Duration::from_millis(500));
    let page_env = env(
        &[HardwareFeature::Telephony],
        radio.clone(),
        ServicesDefaults::default(),
    );
    let h = harness_with(default_page_tree(&page_env).unwrap(), SettingsAccumulator::new());
    h.controller.start().await.unwrap();
    let snapshot = h.controller.next_page().await.unwrap();
    assert_eq!(key_of(&snapshot), Some(keys::MOBILE_DATA));

    let toggle = || PageInput::SetToggle {
        key: KEY_MOBILE_DATA_ENABLED.into(),
        checked: true,
    };
    assert!(!h
        .controller
        .page_input(keys::MOBILE_DATA, toggle())
        .await
        .unwrap());

    tokio::time::advance(Duration::from_millis(501)).await;
    radio.wait_ready().await;

    assert!(h
        .controller
        .page_input(keys::MOBILE_DATA, toggle())
        .await
        .unwrap());
    h.controller.next_page().await.unwrap();
    let pending = h.controller.pending_settings().await.unwrap();
    assert_eq!(pending.get_bool(KEY_MOBILE_DATA_ENABLED), Some(true));
}

#[tokio::test]
async fn services_defaults_come_from_config_and_platform() {
    let store = InMemorySettingsStore::with_values([(
        KEY_PRIVACY_GUARD.to_string(),
        SettingValue::Int(1),
    )]);
    let mut config = AppConfig::empty();
    config.default_theme = "system".into();

    let defaults = load_services_defaults(&store, &config).await;

    assert!(defaults.privacy_guard);
    assert!(!defaults.force_show_navbar);
    assert!(!defaults.offers_theme());
}
