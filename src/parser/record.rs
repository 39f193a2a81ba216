use crate::{Flag, Scope};
use serde::{Serialize, Serializer};
use std::{
    ffi::OsString,
    fmt,
    net::{IpAddr, Ipv6Addr},
};

/// One decoded entry of the kernel IPv6 address table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    #[serde(serialize_with = "serialize_address")]
    pub address: [u8; 16],
    pub interface_index: u32,
    pub prefix_length: u8,
    pub scope: Scope,
    pub flags: Vec<Flag>,
    /// Interface name exactly as the kernel wrote it, which may not be UTF-8.
    #[serde(serialize_with = "serialize_device_name")]
    pub device_name: OsString,
}

impl AddressRecord {
    pub fn ip(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.address)
    }

    /// The address as it is rendered: IPv4-mapped addresses
    /// (`::ffff:a.b.c.d`) show as plain IPv4.
    pub fn display_ip(&self) -> IpAddr {
        display_ip(&self.address)
    }
}

fn display_ip(address: &[u8; 16]) -> IpAddr {
    let ip = Ipv6Addr::from(*address);
    match ip.to_ipv4_mapped() {
        Some(v4) => IpAddr::V4(v4),
        None => IpAddr::V6(ip),
    }
}

fn serialize_address<S: Serializer>(address: &[u8; 16], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&display_ip(address))
}

fn serialize_device_name<S: Serializer>(name: &OsString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&name.to_string_lossy())
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self
            .flags
            .iter()
            .map(Flag::label)
            .collect::<Vec<_>>()
            .join(" ");

        write!(
            f,
            "-----\nAddress: {}\nNetlink: {}\nPrefix: {}\nScope: {}\nFlags: [{}]\nDevice: {}\n",
            self.display_ip(),
            self.interface_index,
            self.prefix_length,
            self.scope,
            flags,
            self.device_name.to_string_lossy()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_local() -> AddressRecord {
        let mut address = [0u8; 16];
        address[0] = 0xfe;
        address[1] = 0x80;
        address[15] = 0x0a;

        AddressRecord {
            address,
            interface_index: 2,
            prefix_length: 64,
            scope: Scope::LinkLocal,
            flags: vec![Flag::Secondary, Flag::Permanent],
            device_name: OsString::from("eth0"),
        }
    }

    #[test]
    fn ip_accessor() {
        assert_eq!(link_local().ip(), "fe80::a".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn text_rendering() {
        assert_eq!(
            link_local().to_string(),
            "-----\nAddress: fe80::a\nNetlink: 2\nPrefix: 64\nScope: LinkLocal\n\
             Flags: [Secondary/Temporary Permanent]\nDevice: eth0\n"
        );
    }

    #[test]
    fn text_rendering_without_flags() {
        let record = AddressRecord {
            flags: vec![],
            ..link_local()
        };

        assert!(record.to_string().contains("\nFlags: []\n"));
    }

    #[test]
    fn ipv4_mapped_renders_as_ipv4() {
        let mut address = [0u8; 16];
        address[10] = 0xff;
        address[11] = 0xff;
        address[12..].copy_from_slice(&[192, 0, 2, 7]);
        let record = AddressRecord {
            address,
            ..link_local()
        };

        assert_eq!(record.display_ip(), "192.0.2.7".parse::<IpAddr>().unwrap());
        assert!(record.to_string().contains("\nAddress: 192.0.2.7\n"));
        assert!(toml::to_string(&record)
            .unwrap()
            .contains("address = \"192.0.2.7\""));
    }

    #[test]
    fn loopback_stays_ipv6() {
        let mut address = [0u8; 16];
        address[15] = 1;
        let record = AddressRecord {
            address,
            ..link_local()
        };

        assert!(record.to_string().contains("\nAddress: ::1\n"));
    }

    #[test]
    fn non_utf8_device_name_renders_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let record = AddressRecord {
            device_name: OsString::from_vec(b"eth\xff".to_vec()),
            ..link_local()
        };

        assert!(record.to_string().ends_with("\nDevice: eth\u{fffd}\n"));
    }

    #[test]
    fn toml_rendering() {
        let out = toml::to_string(&link_local()).unwrap();

        assert!(out.contains("address = \"fe80::a\""));
        assert!(out.contains("scope = \"LinkLocal\""));
        assert!(out.contains("\"Secondary/Temporary\""));
        assert!(out.contains("device_name = \"eth0\""));
    }
}
