//! Tests for the session settings model.

use std::sync::Arc;

use chrono::NaiveTime;
use serde_json::json;

use super::*;
use crate::settings::mock::{RecordingRpc, RpcCall};
use crate::settings::{AltSpeedDays, EncryptionMode};

fn payload(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn single(key: &str, value: Value) -> RpcCall {
    RpcCall::Single(key.to_string(), value)
}

/// Creates a model sharing its recorder with the test.
fn model() -> (SessionSettings<Arc<RecordingRpc>>, Arc<RecordingRpc>) {
    let rpc = Arc::new(RecordingRpc::new());
    (SessionSettings::new(Arc::clone(&rpc)), rpc)
}

/// A payload touching every field with non-default values.
fn full_payload(speed_bytes: i64) -> Map<String, Value> {
    payload(json!({
        "rpc-version": 17,
        "rpc-version-minimum": 14,
        "units": { "speed-bytes": speed_bytes },
        "download-dir": "/srv/torrents",
        "trash-original-torrent-files": true,
        "start-added-torrents": true,
        "rename-partial-files": true,
        "incomplete-dir-enabled": true,
        "incomplete-dir": "/srv/incomplete",
        "seedRatioLimited": true,
        "seedRatioLimit": 1.75,
        "idle-seeding-limit-enabled": true,
        "idle-seeding-limit": 30,
        "download-queue-enabled": true,
        "download-queue-size": 5,
        "seed-queue-enabled": true,
        "seed-queue-size": 8,
        "queue-stalled-enabled": true,
        "queue-stalled-minutes": 25,
        "speed-limit-down-enabled": true,
        "speed-limit-down": 2048,
        "speed-limit-up-enabled": true,
        "speed-limit-up": 512,
        "alt-speed-enabled": true,
        "alt-speed-down": 1024,
        "alt-speed-up": 256,
        "alt-speed-time-enabled": true,
        "alt-speed-time-begin": 1320,
        "alt-speed-time-end": 420,
        "alt-speed-time-day": 62,
        "peer-port": 51413,
        "peer-port-random-on-start": true,
        "port-forwarding-enabled": true,
        "encryption": "preferred",
        "utp-enabled": true,
        "pex-enabled": true,
        "dht-enabled": true,
        "lpd-enabled": true,
        "peer-limit-per-torrent": 60,
        "peer-limit-global": 240,
    }))
}

mod decode {
    use super::*;

    #[test]
    fn starts_unpopulated_with_zero_values() {
        let (settings, _) = model();

        assert!(!settings.is_populated());
        assert_eq!(settings.peer_port(), 0);
        assert_eq!(settings.download_directory(), "");
        assert_eq!(settings.encryption_mode(), EncryptionMode::Required);
        assert_eq!(settings.units(), UnitSystem::Binary);
    }

    #[test]
    fn scenario_decimal_payload() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({
            "peer-port": 51413,
            "dht-enabled": true,
            "units": { "speed-bytes": 1000 },
            "speed-limit-down": 100,
        })));

        assert!(settings.is_populated());
        assert_eq!(settings.peer_port(), 51413);
        assert!(settings.dht_enabled());
        assert_eq!(settings.download_speed_limit(), 97);
        assert!(settings.using_decimal_units());
        assert_eq!(rpc.call_count(), 0);
    }

    #[test]
    fn scenario_bogus_encryption() {
        let (mut settings, _) = model();
        settings.decode(&payload(json!({ "encryption": "bogus" })));

        assert_eq!(settings.encryption_mode(), EncryptionMode::Required);
    }

    #[test]
    fn every_field_is_read() {
        let (mut settings, _) = model();
        settings.decode(&full_payload(1024));

        assert_eq!(settings.rpc_version(), 17);
        assert_eq!(settings.minimum_rpc_version(), 14);
        assert_eq!(settings.download_directory(), "/srv/torrents");
        assert_eq!(settings.incomplete_directory(), "/srv/incomplete");
        assert!(settings.rename_incomplete_files());
        assert!((settings.ratio_limit() - 1.75).abs() < f64::EPSILON);
        assert!(settings.idle_seeding_limited());
        assert_eq!(settings.idle_seeding_limit(), 30);
        assert_eq!(settings.seed_queue_size(), 8);
        assert_eq!(settings.idle_queue_limit(), 25);
        assert_eq!(settings.download_speed_limit(), 2048);
        assert_eq!(settings.alternative_upload_speed_limit(), 256);
        assert_eq!(settings.alternative_speed_limits_begin_time(), hm(22, 0));
        assert_eq!(settings.alternative_speed_limits_end_time(), hm(7, 0));
        assert_eq!(settings.alternative_speed_limits_days(), AltSpeedDays::WEEKDAYS);
        assert_eq!(settings.encryption_mode(), EncryptionMode::Preferred);
        assert!(settings.lpd_enabled());
        assert_eq!(settings.maximum_peers_per_torrent(), 60);
    }

    #[test]
    fn later_decode_replaces_instead_of_merging() {
        let (mut settings, _) = model();
        settings.decode(&full_payload(1000));
        settings.decode(&payload(json!({ "peer-port": 6881 })));

        assert_eq!(settings.peer_port(), 6881);
        assert_eq!(settings.download_directory(), "");
        assert!(!settings.dht_enabled());
        assert_eq!(settings.units(), UnitSystem::Binary);
        assert_eq!(settings.rpc_version(), 0);
    }

    #[test]
    fn decode_discards_local_edits() {
        let (mut settings, _) = model();
        settings.set_peer_port(1234, false);
        settings.decode(&payload(json!({ "peer-port": 51413 })));

        assert_eq!(settings.peer_port(), 51413);
    }

    #[test]
    fn malformed_entries_become_zero_values() {
        let (mut settings, _) = model();
        settings.decode(&payload(json!({
            "peer-port": "51413",
            "dht-enabled": "yes",
            "download-dir": 42,
            "seedRatioLimit": null,
            "alt-speed-time-begin": 5000,
            "units": "decimal",
        })));

        assert_eq!(settings.peer_port(), 0);
        assert!(!settings.dht_enabled());
        assert_eq!(settings.download_directory(), "");
        assert!(settings.ratio_limit().abs() < f64::EPSILON);
        assert_eq!(settings.alternative_speed_limits_begin_time(), hm(0, 0));
        assert_eq!(settings.units(), UnitSystem::Binary);
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn binary_units_round_trip_exactly() {
        let (mut settings, _) = model();
        settings.decode(&full_payload(1024));
        let before = settings.values().clone();

        settings.decode(&settings.encode_all());

        assert_eq!(settings.values(), &before);
    }

    #[test]
    fn decimal_units_round_trip_except_speeds() {
        let (mut settings, _) = model();
        settings.decode(&full_payload(1000));
        let before = settings.values().clone();

        settings.decode(&settings.encode_all());
        let after = settings.values();

        let same_apart_from_speeds = SettingValues {
            download_speed_limit: before.download_speed_limit,
            upload_speed_limit: before.upload_speed_limit,
            alternative_download_speed_limit: before.alternative_download_speed_limit,
            alternative_upload_speed_limit: before.alternative_upload_speed_limit,
            ..after.clone()
        };
        assert_eq!(same_apart_from_speeds, before);

        for (old, new) in [
            (before.download_speed_limit, after.download_speed_limit),
            (before.upload_speed_limit, after.upload_speed_limit),
            (before.alternative_download_speed_limit, after.alternative_download_speed_limit),
            (before.alternative_upload_speed_limit, after.alternative_upload_speed_limit),
        ] {
            assert!(new <= old && old - new < 1024, "{old} -> {new}");
        }
    }

    #[test]
    fn edited_values_round_trip() {
        let (mut settings, _) = model();
        settings.set_download_directory("/mnt/media", false);
        settings.set_ratio_limit(0.5, false);
        settings.set_alternative_speed_limits_begin_time(hm(9, 45), false);
        settings.set_alternative_speed_limits_days(AltSpeedDays::WEEKENDS, false);
        settings.set_encryption_mode(EncryptionMode::Allowed, false);
        settings.set_upload_speed_limit(777, false);
        let before = settings.values().clone();

        settings.decode(&settings.encode_all());

        assert_eq!(settings.values(), &before);
    }

    #[test]
    fn encode_all_includes_read_only_keys() {
        let (mut settings, _) = model();
        settings.decode(&full_payload(1000));
        let encoded = settings.encode_all();

        assert_eq!(encoded["rpc-version"], json!(17));
        assert_eq!(encoded["rpc-version-minimum"], json!(14));
        assert_eq!(encoded["units"], json!({ "speed-bytes": 1000 }));
        assert_eq!(encoded.len(), Field::ALL.len() + 3);
    }

    #[test]
    fn encode_all_converts_to_wire_units() {
        let (mut settings, _) = model();
        settings.decode(&payload(json!({ "units": { "speed-bytes": 1000 } })));
        settings.set_download_speed_limit(1000, false);
        settings.set_encryption_mode(EncryptionMode::Allowed, false);
        settings.set_alternative_speed_limits_end_time(hm(1, 30), false);

        let encoded = settings.encode_all();

        assert_eq!(encoded["speed-limit-down"], json!(1024));
        assert_eq!(encoded["encryption"], json!("tolerated"));
        assert_eq!(encoded["alt-speed-time-end"], json!(90));
    }
}

mod write_through {
    use super::*;

    #[test]
    fn scenario_unchanged_directory_is_not_pushed() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({ "download-dir": "/new/path" })));

        settings.set_download_directory("/new/path", true);
        assert_eq!(rpc.call_count(), 0);

        settings.set_download_directory("/other/path", true);
        assert_eq!(rpc.calls(), [single("download-dir", json!("/other/path"))]);
        assert_eq!(settings.download_directory(), "/other/path");
    }

    #[test]
    fn incomplete_directory_is_change_detected() {
        let (mut settings, rpc) = model();

        settings.set_incomplete_directory("", true);
        settings.set_incomplete_directory("/tmp/partial", true);
        settings.set_incomplete_directory("/tmp/partial", true);

        assert_eq!(rpc.calls(), [single("incomplete-dir", json!("/tmp/partial"))]);
    }

    #[test]
    fn unchanged_day_mask_is_not_pushed() {
        let (mut settings, rpc) = model();

        settings.set_alternative_speed_limits_days(AltSpeedDays::ALL, true);
        settings.set_alternative_speed_limits_days(AltSpeedDays::ALL, true);

        assert_eq!(rpc.calls(), [single("alt-speed-time-day", json!(127))]);
    }

    #[test]
    fn bool_setter_pushes_even_when_unchanged() {
        let (mut settings, rpc) = model();

        settings.set_dht_enabled(false, true);
        assert_eq!(rpc.calls(), [single("dht-enabled", json!(false))]);

        rpc.clear();
        settings.set_dht_enabled(true, true);
        assert_eq!(rpc.calls(), [single("dht-enabled", json!(true))]);
    }

    #[test]
    fn integer_setter_pushes_even_when_unchanged() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({ "peer-port": 51413 })));

        settings.set_peer_port(51413, true);
        settings.set_peer_port(51413, true);

        assert_eq!(
            rpc.calls(),
            [
                single("peer-port", json!(51413)),
                single("peer-port", json!(51413)),
            ]
        );
    }

    #[test]
    fn speed_setter_pushes_wire_units() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({ "units": { "speed-bytes": 1000 } })));

        settings.set_alternative_download_speed_limit(500, true);

        assert_eq!(settings.alternative_download_speed_limit(), 500);
        assert_eq!(rpc.calls(), [single("alt-speed-down", json!(512))]);
    }

    #[test]
    fn enum_setter_pushes_wire_string() {
        let (mut settings, rpc) = model();

        settings.set_encryption_mode(EncryptionMode::Preferred, true);

        assert_eq!(rpc.calls(), [single("encryption", json!("preferred"))]);
    }

    #[test]
    fn time_setter_truncates_and_pushes_minutes() {
        let (mut settings, rpc) = model();
        let time = NaiveTime::from_hms_opt(23, 15, 59).unwrap();

        settings.set_alternative_speed_limits_begin_time(time, true);

        assert_eq!(settings.alternative_speed_limits_begin_time(), hm(23, 15));
        assert_eq!(rpc.calls(), [single("alt-speed-time-begin", json!(1395))]);
    }

    #[test]
    fn deferred_setters_stay_local() {
        let (mut settings, rpc) = model();

        settings.set_download_directory("/a", false);
        settings.set_peer_port(1, false);
        settings.set_utp_enabled(true, false);

        assert_eq!(rpc.call_count(), 0);
        assert_eq!(settings.download_directory(), "/a");
        assert_eq!(settings.peer_port(), 1);
        assert!(settings.utp_enabled());
    }

    #[test]
    fn deferred_directory_edit_is_still_change_detected() {
        let (mut settings, rpc) = model();
        settings.set_download_directory("/a", false);

        // Already "/a", so nothing to store or push.
        settings.set_download_directory("/a", true);

        assert_eq!(rpc.call_count(), 0);
    }
}

mod save {
    use super::*;

    #[test]
    fn pushes_all_writable_entries_once() {
        let (mut settings, rpc) = model();
        settings.decode(&full_payload(1000));

        settings.save();

        let calls = rpc.calls();
        assert_eq!(calls.len(), 1);
        let RpcCall::Bulk(entries) = &calls[0] else {
            panic!("Expected bulk call, got {calls:?}");
        };
        assert_eq!(entries.len(), Field::ALL.len());
        assert_eq!(entries[0], ("download-dir".to_string(), json!("/srv/torrents")));
        assert!(entries.iter().all(|(key, _)| key != "rpc-version" && key != "units"));
    }

    #[test]
    fn pushes_buffered_edits_in_wire_units() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({ "units": { "speed-bytes": 1000 } })));
        settings.set_download_speed_limit(1000, false);
        settings.set_idle_seeding_limited(true, false);
        settings.set_idle_seeding_limit(90, false);

        settings.save();

        let calls = rpc.calls();
        let RpcCall::Bulk(entries) = &calls[0] else {
            panic!("Expected bulk call");
        };
        let lookup = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.clone())
        };
        assert_eq!(lookup("speed-limit-down"), Some(json!(1024)));
        assert_eq!(lookup("idle-seeding-limit-enabled"), Some(json!(true)));
        assert_eq!(lookup("idle-seeding-limit"), Some(json!(90)));
    }
}

mod apply_wire_value {
    use super::*;

    #[test]
    fn decodes_with_field_codec() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({ "units": { "speed-bytes": 1000 } })));

        settings.apply_wire_value(Field::DownloadSpeedLimit, &json!(100), true);
        settings.apply_wire_value(Field::EncryptionMode, &json!("bogus"), true);

        assert_eq!(settings.download_speed_limit(), 97);
        assert_eq!(settings.encryption_mode(), EncryptionMode::Required);
        assert_eq!(
            rpc.calls(),
            [
                single("speed-limit-down", json!(99)),
                single("encryption", json!("required")),
            ]
        );
    }

    #[test]
    fn honours_change_detection() {
        let (mut settings, rpc) = model();
        settings.decode(&payload(json!({ "download-dir": "/data" })));

        settings.apply_wire_value(Field::DownloadDirectory, &json!("/data"), true);

        assert_eq!(rpc.call_count(), 0);
    }

    #[test]
    fn wrong_kind_sets_zero_value() {
        let (mut settings, _) = model();
        settings.decode(&payload(json!({ "peer-port": 51413 })));

        settings.apply_wire_value(Field::PeerPort, &json!("oops"), false);

        assert_eq!(settings.peer_port(), 0);
    }
}

mod collaborator {
    use super::*;

    #[test]
    fn works_with_borrowed_collaborator() {
        let rpc = RecordingRpc::new();
        let mut settings = SessionSettings::new(&rpc);

        settings.set_pex_enabled(true, true);

        assert_eq!(rpc.call_count(), 1);
    }

    #[test]
    fn works_with_boxed_trait_object() {
        let rpc = Arc::new(RecordingRpc::new());
        let boxed: Box<dyn SessionRpc> = Box::new(Arc::clone(&rpc));
        let mut settings = SessionSettings::new(boxed);

        settings.set_lpd_enabled(true, true);
        settings.save();

        assert_eq!(rpc.call_count(), 2);
    }
}
