//! Flag Registry
//!
//! Named bit positions for every packed numeric field the configuration model
//! carries, plus the single bit-test primitive all rules go through.
//!
//! # Packed fields
//!
//! | Field                         | Flags              |
//! |-------------------------------|--------------------|
//! | Service `details` word 0      | [`ServiceFlags`]   |
//! | Endpoint `details` word 0     | [`EndpointFlags`]  |
//! | `router` capability word 0    | [`RouterFlags`]    |
//! | `plugin/http-server` word 0   | [`ServerPlugins`]  |
//!
//! Bit positions are a versioned contract with the model loader. Never
//! renumber a flag; append new ones at the end.

use bitflags::{bitflags, Flags};

/// Width of a packed word in bits
pub const WORD_BITS: u32 = i64::BITS;

/// Test whether `bit` is set in a packed word.
///
/// Negative words and bit indices outside the word are reported as unset.
pub fn test_bit(value: i64, bit: u32) -> bool {
    if value < 0 {
        return false;
    }
    value.checked_shr(bit).is_some_and(|v| v & 1 == 1)
}

/// A bitflags type describing one packed field of the model
pub trait PackedFlags: Flags<Bits = i64> + Copy + Send + Sync + 'static {
    /// Human-readable name of the packed field
    const FIELD: &'static str;

    /// Whether every bit of `self` is set in `word`
    ///
    /// An empty set is never reported as set.
    fn is_set_in(self, word: i64) -> bool {
        let bits = self.bits();
        bits > 0
            && (0..WORD_BITS)
                .filter(|&bit| test_bit(bits, bit))
                .all(|bit| test_bit(word, bit))
    }

    /// Decode a packed word, keeping unknown bits; negative words decode empty
    fn from_word(word: i64) -> Self {
        if word < 0 {
            Self::empty()
        } else {
            Self::from_bits_retain(word)
        }
    }
}

bitflags! {
    /// Service-level flags (service `details` word 0)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ServiceFlags: i64 {
        /// At least one server plugin is loaded
        const HAS_PLUGINS = 1 << 0;
        /// Async agents are started one after another
        const SEQUENTIAL_START = 1 << 1;
        /// Debug endpoint exposed
        const DEBUG = 1 << 2;
        /// TLS verification skipped for outgoing connections
        const ALLOW_INSECURE_CONNECTIONS = 1 << 3;
        /// Strict REST path matching turned off
        const DISABLE_STRICT_REST = 1 << 4;
        /// A TLS section exists
        const HAS_TLS = 1 << 5;
        /// The TLS section is not disabled
        const TLS_ENABLED = 1 << 6;
        const TLS_MUTUAL_AUTH = 1 << 7;
        const TLS_DISABLE_SYSTEM_CA_POOL = 1 << 8;
        const TLS_CA_CERTS = 1 << 9;
        /// Echo endpoint exposed
        const ECHO = 1 << 10;
    }
}

impl PackedFlags for ServiceFlags {
    const FIELD: &'static str = "service";
}

bitflags! {
    /// Endpoint-level flags (endpoint `details` word 0): output encoding
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EndpointFlags: i64 {
        /// Response passed through untouched
        const ENCODING_NOOP = 1 << 0;
        const ENCODING_JSON = 1 << 1;
        const ENCODING_SAFE_JSON = 1 << 2;
        const ENCODING_STRING = 1 << 3;
        const ENCODING_RSS = 1 << 4;
        const ENCODING_XML = 1 << 5;
        /// Any encoding not listed above
        const ENCODING_OTHER = 1 << 6;
    }
}

impl PackedFlags for EndpointFlags {
    const FIELD: &'static str = "endpoint";
}

impl EndpointFlags {
    /// Resolve an output encoding name to its flag
    pub fn from_encoding(encoding: &str) -> Self {
        match encoding {
            "no-op" => Self::ENCODING_NOOP,
            "json" => Self::ENCODING_JSON,
            "safejson" => Self::ENCODING_SAFE_JSON,
            "string" => Self::ENCODING_STRING,
            "rss" => Self::ENCODING_RSS,
            "xml" => Self::ENCODING_XML,
            _ => Self::ENCODING_OTHER,
        }
    }
}

bitflags! {
    /// Router capability flags (`router` capability word 0)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RouterFlags: i64 {
        const RETURN_ERROR_MESSAGE = 1 << 0;
        const DISABLE_HEALTH = 1 << 1;
        const DISABLE_ACCESS_LOG = 1 << 2;
        const CUSTOM_HEALTH_PATH = 1 << 3;
        const CUSTOM_ERROR_MESSAGE = 1 << 4;
        const DISABLE_REDIRECT_TRAILING_SLASH = 1 << 5;
        const DISABLE_REDIRECT_FIXED_PATH = 1 << 6;
        const REMOVE_EXTRA_SLASH = 1 << 7;
        const DISABLE_HANDLE_METHOD_NOT_ALLOWED = 1 << 8;
        const DISABLE_PATH_DECODING = 1 << 9;
        const AUTO_OPTIONS = 1 << 10;
        const FORWARDED_BY_CLIENT_IP = 1 << 11;
        const REMOTE_IP_HEADERS = 1 << 12;
        const TRUSTED_PROXIES = 1 << 13;
        const APP_ENGINE = 1 << 14;
        const MAX_MULTIPART_MEMORY = 1 << 15;
        const LOGGER_SKIP_PATHS = 1 << 16;
        /// Version banner header suppressed
        const HIDE_VERSION_HEADER = 1 << 17;
    }
}

impl PackedFlags for RouterFlags {
    const FIELD: &'static str = "router";
}

bitflags! {
    /// HTTP server plugins (`plugin/http-server` capability word 0)
    ///
    /// Flag names are the plugin names upper-cased with `-` replaced by `_`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ServerPlugins: i64 {
        /// Any plugin name not in this table
        const UNKNOWN = 1 << 0;
        const BASIC_AUTH = 1 << 1;
        const GEOIP = 1 << 2;
        const IP_FILTER = 1 << 3;
        const JWK_AGGREGATOR = 1 << 4;
        const STATIC_FILESYSTEM = 1 << 5;
        const URL_REWRITE = 1 << 6;
        const VIRTUALHOST = 1 << 7;
        const WILDCARD = 1 << 8;
        const NO_REDIRECT = 1 << 9;
        const REDIS_RATELIMIT = 1 << 10;
    }
}

impl PackedFlags for ServerPlugins {
    const FIELD: &'static str = "http-server-plugin";
}

impl ServerPlugins {
    /// Resolve a plugin name such as `basic-auth`
    ///
    /// Unrecognized names map to [`ServerPlugins::UNKNOWN`].
    pub fn from_plugin_name(name: &str) -> Self {
        Self::from_name(&name.to_ascii_uppercase().replace('-', "_")).unwrap_or(Self::UNKNOWN)
    }

    /// Packed word for a list of plugin names
    pub fn from_plugin_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .map(Self::from_plugin_name)
            .fold(Self::empty(), |acc, plugin| acc | plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_single_bits<F: PackedFlags>() {
        let mut seen = HashSet::new();
        for (name, flag) in F::all().iter_names() {
            let bits = flag.bits();
            assert_eq!(bits.count_ones(), 1, "{}: {} is not a single bit", F::FIELD, name);
            assert!(bits.trailing_zeros() < WORD_BITS - 1, "{}: {} out of range", F::FIELD, name);
            assert!(seen.insert(bits), "{}: duplicate bit for {}", F::FIELD, name);
        }
        assert!(!seen.is_empty(), "{}: no flags declared", F::FIELD);
    }

    #[test]
    fn test_bit_matches_shift_and_mask() {
        for value in [0i64, 1, 2, 5, 0b1010_1010, 1 << 40, i64::MAX] {
            for bit in 0..WORD_BITS {
                assert_eq!(test_bit(value, bit), (value >> bit) & 1 == 1);
            }
        }
    }

    #[test]
    fn test_bit_zero_is_never_set() {
        for bit in 0..WORD_BITS + 8 {
            assert!(!test_bit(0, bit));
        }
    }

    #[test]
    fn test_bit_out_of_range_is_unset() {
        assert!(!test_bit(-1, 0));
        assert!(!test_bit(i64::MIN, 63));
        assert!(!test_bit(i64::MAX, 64));
        assert!(!test_bit(i64::MAX, u32::MAX));
    }

    #[test]
    fn test_flag_tables_are_consistent() {
        assert_single_bits::<ServiceFlags>();
        assert_single_bits::<EndpointFlags>();
        assert_single_bits::<RouterFlags>();
        assert_single_bits::<ServerPlugins>();
    }

    #[test]
    fn test_bit_positions_are_stable() {
        assert_eq!(ServiceFlags::HAS_TLS.bits(), 1 << 5);
        assert_eq!(ServiceFlags::TLS_ENABLED.bits(), 1 << 6);
        assert_eq!(ServiceFlags::ECHO.bits(), 1 << 10);
        assert_eq!(RouterFlags::HIDE_VERSION_HEADER.bits(), 1 << 17);
        assert_eq!(ServerPlugins::BASIC_AUTH.bits(), 1 << 1);
        assert_eq!(ServiceFlags::all().iter().count(), 11);
        assert_eq!(RouterFlags::all().iter().count(), 18);
    }

    #[test]
    fn test_is_set_in() {
        let word = (ServiceFlags::HAS_TLS | ServiceFlags::TLS_ENABLED).bits();
        assert!(ServiceFlags::HAS_TLS.is_set_in(word));
        assert!(ServiceFlags::TLS_ENABLED.is_set_in(word));
        assert!((ServiceFlags::HAS_TLS | ServiceFlags::TLS_ENABLED).is_set_in(word));
        assert!(!(ServiceFlags::HAS_TLS | ServiceFlags::DEBUG).is_set_in(word));
        assert!(!ServiceFlags::DEBUG.is_set_in(word));
        assert!(!ServiceFlags::empty().is_set_in(word));
    }

    #[test]
    fn test_negative_word_reads_as_unset() {
        for (_, flag) in ServiceFlags::all().iter_names() {
            assert!(!flag.is_set_in(-1));
        }
        assert_eq!(ServiceFlags::from_word(-1), ServiceFlags::empty());
    }

    #[test]
    fn test_from_word_retains_unknown_bits() {
        let word = ServiceFlags::DEBUG.bits() | (1 << 40);
        let flags = ServiceFlags::from_word(word);
        assert!(flags.contains(ServiceFlags::DEBUG));
        assert_eq!(flags.bits(), word);
    }

    #[test]
    fn test_server_plugin_from_name() {
        assert_eq!(ServerPlugins::from_plugin_name("basic-auth"), ServerPlugins::BASIC_AUTH);
        assert_eq!(ServerPlugins::from_plugin_name("ip-filter"), ServerPlugins::IP_FILTER);
        assert_eq!(ServerPlugins::from_plugin_name("virtualhost"), ServerPlugins::VIRTUALHOST);
        assert_eq!(ServerPlugins::from_plugin_name("my-custom-plugin"), ServerPlugins::UNKNOWN);
        assert_eq!(ServerPlugins::from_plugin_name(""), ServerPlugins::UNKNOWN);
    }

    #[test]
    fn test_server_plugins_from_names() {
        let plugins = ServerPlugins::from_plugin_names(["geoip", "basic-auth", "custom"]);
        assert_eq!(
            plugins,
            ServerPlugins::GEOIP | ServerPlugins::BASIC_AUTH | ServerPlugins::UNKNOWN
        );
        assert!(ServerPlugins::BASIC_AUTH.is_set_in(plugins.bits()));
    }

    #[test]
    fn test_encoding_from_name() {
        assert_eq!(EndpointFlags::from_encoding("no-op"), EndpointFlags::ENCODING_NOOP);
        assert_eq!(EndpointFlags::from_encoding("json"), EndpointFlags::ENCODING_JSON);
        assert_eq!(EndpointFlags::from_encoding("yaml"), EndpointFlags::ENCODING_OTHER);
    }
}
