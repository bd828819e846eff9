//! Tests for TOML configuration parsing.

use std::path::Path;

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [netbox]
            url = "https://netbox.example.com"
            token = "abc123"

            [satellites]
            icinga = "sat1.example.com"
            nrpe = "sat2.example.com"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.netbox.url.as_deref(),
            Some("https://netbox.example.com")
        );
        assert_eq!(config.netbox.token.as_deref(), Some("abc123"));
        assert_eq!(config.satellites.icinga.as_deref(), Some("sat1.example.com"));
        assert_eq!(config.satellites.nrpe.as_deref(), Some("sat2.example.com"));
        assert!(config.netbox.tag.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [netbox]
            url = "https://netbox.example.com"
            token = "abc123"
            tag = "monitoring"
            page_size = 200
            timeout = 5

            [satellites]
            icinga = "sat1"
            nrpe = "sat2"

            [output]
            zones_root = "/srv/zones.d"
            hosts_dir = "hosts.generated"
            zones_dir = "zones.generated"

            [templates]
            host = "/etc/icinga2-netbox/host.hbs"
            zone = "/etc/icinga2-netbox/zone.hbs"

            [blacklist]
            path = "/etc/icinga2-netbox/blacklist"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.netbox.tag.as_deref(), Some("monitoring"));
        assert_eq!(config.netbox.page_size, Some(200));
        assert_eq!(config.netbox.timeout, Some(5));
        assert_eq!(
            config.output.zones_root.as_deref(),
            Some(Path::new("/srv/zones.d"))
        );
        assert_eq!(config.output.hosts_dir.as_deref(), Some("hosts.generated"));
        assert_eq!(config.output.zones_dir.as_deref(), Some("zones.generated"));
        assert_eq!(
            config.templates.host.as_deref(),
            Some(Path::new("/etc/icinga2-netbox/host.hbs"))
        );
        assert_eq!(
            config.templates.zone.as_deref(),
            Some(Path::new("/etc/icinga2-netbox/zone.hbs"))
        );
        assert_eq!(
            config.blacklist.path.as_deref(),
            Some(Path::new("/etc/icinga2-netbox/blacklist"))
        );
    }

    #[test]
    fn empty_config_is_valid() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.netbox.url.is_none());
        assert!(config.satellites.icinga.is_none());
        assert!(config.output.zones_root.is_none());
        assert!(config.blacklist.path.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[webhook]\nurl = \"https://example.com\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[netbox]\nbearer = \"abc\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[netbox]\npage_size = \"lots\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = TomlConfig::load(Path::new("/nonexistent/icinga2-netbox.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        // Everything is commented out
        assert!(config.netbox.url.is_none());
        assert!(config.netbox.token.is_none());
        assert!(config.satellites.icinga.is_none());
    }

    #[test]
    fn default_template_documents_every_section() {
        let template = default_config_template();

        for section in ["[netbox]", "[satellites]", "[output]", "[templates]", "[blacklist]"] {
            assert!(template.contains(section), "missing {section}");
        }
        assert!(template.contains("NETBOX_TOKEN"));
    }
}
