//! The field registry.
//!
//! Every writable setting is declared once in the `session_fields!` table
//! below. The macro expands that table into the [`Field`] enum, the
//! [`SettingValues`] snapshot with its decode/encode logic, and the typed
//! getter/setter pairs on [`SessionSettings`].

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::codec::{Codec, Count, Days, Encryption, Flag, Minutes, Ratio, Speed, Text, read_i64};
use super::error::FieldError;
use super::model::{SessionSettings, WritePolicy, assign};
use super::rpc::{SessionEntries, SessionRpc};
use super::units::UnitSystem;

/// Wire key of the daemon's RPC protocol version.
pub const RPC_VERSION_KEY: &str = "rpc-version";

/// Wire key of the oldest RPC protocol version the daemon still accepts.
pub const MINIMUM_RPC_VERSION_KEY: &str = "rpc-version-minimum";

macro_rules! session_fields {
    ($(
        $(#[$doc:meta])*
        $variant:ident => $getter:ident, $setter:ident: $codec:ty = $key:literal, $policy:ident;
    )*) => {
        /// A writable session setting.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $(
                $(#[$doc])*
                $variant,
            )*
        }

        impl Field {
            /// Every writable field, in wire order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Returns the wire key.
            #[must_use]
            pub const fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)*
                }
            }

            /// Returns when a write-through setter pushes this field.
            #[must_use]
            pub const fn write_policy(self) -> WritePolicy {
                match self {
                    $(Self::$variant => WritePolicy::$policy,)*
                }
            }

            /// Whether `raw` has exactly the wire kind this field expects.
            #[must_use]
            pub fn accepts(self, raw: &Value) -> bool {
                match self {
                    $(Self::$variant => <$codec as Codec>::accepts(raw),)*
                }
            }

            /// Whether the field holds free-form text.
            #[must_use]
            pub const fn is_text(self) -> bool {
                match self {
                    $(Self::$variant => <$codec as Codec>::FREE_TEXT,)*
                }
            }

            /// Looks a field up by wire key.
            #[must_use]
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        /// Plain snapshot of the daemon's session settings.
        ///
        /// Speed limits are in KiB/s regardless of [`SettingValues::units`].
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct SettingValues {
            /// RPC protocol version reported by the daemon.
            pub rpc_version: i64,
            /// Oldest RPC protocol version the daemon accepts.
            pub minimum_rpc_version: i64,
            /// Unit system of speed limits on the wire.
            pub units: UnitSystem,
            $(
                $(#[$doc])*
                pub $getter: <$codec as Codec>::Value,
            )*
        }

        impl SettingValues {
            /// Decodes a complete snapshot from a session payload.
            ///
            /// `units` must already have been read from the same payload.
            #[must_use]
            pub fn decode(payload: &Map<String, Value>, units: UnitSystem) -> Self {
                Self {
                    rpc_version: read_i64(payload.get(RPC_VERSION_KEY)),
                    minimum_rpc_version: read_i64(payload.get(MINIMUM_RPC_VERSION_KEY)),
                    units,
                    $(
                        $getter: <$codec as Codec>::decode(lookup(payload, $key), units),
                    )*
                }
            }

            /// Encodes every writable field, in wire order.
            #[must_use]
            pub fn writable_entries(&self) -> SessionEntries {
                vec![
                    $(($key, <$codec as Codec>::encode(&self.$getter, self.units)),)*
                ]
            }

            /// Encodes a single field the same way [`Self::writable_entries`] does.
            #[must_use]
            pub fn encode_field(&self, field: Field) -> Value {
                match field {
                    $(Field::$variant => <$codec as Codec>::encode(&self.$getter, self.units),)*
                }
            }

            /// `(key, value)` pairs for every writable field, spelled as on
            /// the wire. Strings are printed without quotes.
            #[must_use]
            pub fn describe(&self) -> Vec<(&'static str, String)> {
                self.writable_entries()
                    .into_iter()
                    .map(|(key, value)| (key, wire_text(value)))
                    .collect()
            }
        }

        impl<R: SessionRpc> SessionSettings<R> {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $getter(&self) -> <$codec as Codec>::View<'_> {
                    <$codec as Codec>::view(&self.values.$getter)
                }

                #[doc = concat!("Sets `", $key, "`, pushing it upstream when `write_through` is true.")]
                pub fn $setter(&mut self, value: impl Into<<$codec as Codec>::Value>, write_through: bool) {
                    let value = <$codec as Codec>::normalize(value.into());
                    if assign(&mut self.values.$getter, value, WritePolicy::$policy) && write_through {
                        self.push(Field::$variant);
                    }
                }
            )*

            /// Decodes a raw wire value for `field` and routes it through the
            /// field's typed setter.
            ///
            /// The value is interpreted with the current unit system, so speed
            /// limits are expected in the daemon's unit.
            pub fn apply_wire_value(&mut self, field: Field, raw: &Value, write_through: bool) {
                let units = self.values.units;
                match field {
                    $(
                        Field::$variant => {
                            self.$setter(<$codec as Codec>::decode(Some(raw), units), write_through);
                        }
                    )*
                }
            }
        }
    };
}

fn wire_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn lookup<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let value = payload.get(key);
    if value.is_none() {
        tracing::trace!(key, "Session payload has no value, using zero-value");
    }
    value
}

session_fields! {
    // Downloading
    /// Default directory for new torrents.
    DownloadDirectory => download_directory, set_download_directory: Text = "download-dir", IfChanged;
    /// Whether added .torrent files are deleted.
    TrashTorrentFiles => trash_torrent_files, set_trash_torrent_files: Flag = "trash-original-torrent-files", Always;
    /// Whether added torrents start immediately.
    StartAddedTorrents => start_added_torrents, set_start_added_torrents: Flag = "start-added-torrents", Always;
    /// Whether incomplete files get a `.part` suffix.
    RenameIncompleteFiles => rename_incomplete_files, set_rename_incomplete_files: Flag = "rename-partial-files", Always;
    /// Whether incomplete torrents live in a separate directory.
    IncompleteDirectoryEnabled => incomplete_directory_enabled, set_incomplete_directory_enabled: Flag = "incomplete-dir-enabled", Always;
    /// Directory for incomplete torrents.
    IncompleteDirectory => incomplete_directory, set_incomplete_directory: Text = "incomplete-dir", IfChanged;

    // Seeding
    /// Whether seeding stops at the ratio limit.
    RatioLimited => ratio_limited, set_ratio_limited: Flag = "seedRatioLimited", Always;
    /// Upload/download ratio at which seeding stops.
    RatioLimit => ratio_limit, set_ratio_limit: Ratio = "seedRatioLimit", Always;
    /// Whether idle torrents stop seeding.
    IdleSeedingLimited => idle_seeding_limited, set_idle_seeding_limited: Flag = "idle-seeding-limit-enabled", Always;
    /// Idle minutes after which seeding stops.
    IdleSeedingLimit => idle_seeding_limit, set_idle_seeding_limit: Count = "idle-seeding-limit", Always;

    // Queueing
    /// Whether the download queue is enabled.
    DownloadQueueEnabled => download_queue_enabled, set_download_queue_enabled: Flag = "download-queue-enabled", Always;
    /// Number of torrents downloading at once.
    DownloadQueueSize => download_queue_size, set_download_queue_size: Count = "download-queue-size", Always;
    /// Whether the seed queue is enabled.
    SeedQueueEnabled => seed_queue_enabled, set_seed_queue_enabled: Flag = "seed-queue-enabled", Always;
    /// Number of torrents seeding at once.
    SeedQueueSize => seed_queue_size, set_seed_queue_size: Count = "seed-queue-size", Always;
    /// Whether stalled torrents leave the queue.
    IdleQueueLimited => idle_queue_limited, set_idle_queue_limited: Flag = "queue-stalled-enabled", Always;
    /// Idle minutes after which a torrent counts as stalled.
    IdleQueueLimit => idle_queue_limit, set_idle_queue_limit: Count = "queue-stalled-minutes", Always;

    // Speed
    /// Whether the download speed limit applies.
    DownloadSpeedLimited => download_speed_limited, set_download_speed_limited: Flag = "speed-limit-down-enabled", Always;
    /// Download speed limit in KiB/s.
    DownloadSpeedLimit => download_speed_limit, set_download_speed_limit: Speed = "speed-limit-down", Always;
    /// Whether the upload speed limit applies.
    UploadSpeedLimited => upload_speed_limited, set_upload_speed_limited: Flag = "speed-limit-up-enabled", Always;
    /// Upload speed limit in KiB/s.
    UploadSpeedLimit => upload_speed_limit, set_upload_speed_limit: Speed = "speed-limit-up", Always;
    /// Whether the alternative speed limits are active.
    AlternativeSpeedLimitsEnabled => alternative_speed_limits_enabled, set_alternative_speed_limits_enabled: Flag = "alt-speed-enabled", Always;
    /// Alternative download speed limit in KiB/s.
    AlternativeDownloadSpeedLimit => alternative_download_speed_limit, set_alternative_download_speed_limit: Speed = "alt-speed-down", Always;
    /// Alternative upload speed limit in KiB/s.
    AlternativeUploadSpeedLimit => alternative_upload_speed_limit, set_alternative_upload_speed_limit: Speed = "alt-speed-up", Always;
    /// Whether the alternative limits follow the schedule.
    AlternativeSpeedLimitsScheduled => alternative_speed_limits_scheduled, set_alternative_speed_limits_scheduled: Flag = "alt-speed-time-enabled", Always;
    /// Start of the alternative speed window.
    AlternativeSpeedLimitsBeginTime => alternative_speed_limits_begin_time, set_alternative_speed_limits_begin_time: Minutes = "alt-speed-time-begin", Always;
    /// End of the alternative speed window.
    AlternativeSpeedLimitsEndTime => alternative_speed_limits_end_time, set_alternative_speed_limits_end_time: Minutes = "alt-speed-time-end", Always;
    /// Days on which the alternative speed window applies.
    AlternativeSpeedLimitsDays => alternative_speed_limits_days, set_alternative_speed_limits_days: Days = "alt-speed-time-day", IfChanged;

    // Network
    /// Incoming peer port.
    PeerPort => peer_port, set_peer_port: Count = "peer-port", Always;
    /// Whether the daemon picks a random port on start.
    RandomPortEnabled => random_port_enabled, set_random_port_enabled: Flag = "peer-port-random-on-start", Always;
    /// Whether UPnP/NAT-PMP port forwarding is enabled.
    PortForwardingEnabled => port_forwarding_enabled, set_port_forwarding_enabled: Flag = "port-forwarding-enabled", Always;
    /// Peer connection encryption policy.
    EncryptionMode => encryption_mode, set_encryption_mode: Encryption = "encryption", Always;
    /// Whether µTP is enabled.
    UtpEnabled => utp_enabled, set_utp_enabled: Flag = "utp-enabled", Always;
    /// Whether peer exchange is enabled.
    PexEnabled => pex_enabled, set_pex_enabled: Flag = "pex-enabled", Always;
    /// Whether the DHT is enabled.
    DhtEnabled => dht_enabled, set_dht_enabled: Flag = "dht-enabled", Always;
    /// Whether local peer discovery is enabled.
    LpdEnabled => lpd_enabled, set_lpd_enabled: Flag = "lpd-enabled", Always;
    /// Peer limit per torrent.
    MaximumPeersPerTorrent => maximum_peers_per_torrent, set_maximum_peers_per_torrent: Count = "peer-limit-per-torrent", Always;
    /// Global peer limit.
    MaximumPeersGlobally => maximum_peers_globally, set_maximum_peers_globally: Count = "peer-limit-global", Always;
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::from_key(key).ok_or_else(|| FieldError::UnknownKey(key.to_owned()))
    }
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
