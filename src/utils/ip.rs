//! IPv4 地址工具
//!
//! 判断生成的访客地址是否为公网可路由地址。

use std::net::Ipv4Addr;

/// A network in CIDR form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Net {
    pub network: Ipv4Addr,
    pub prefix_len: u8,
}

impl Ipv4Net {
    pub const fn new(network: Ipv4Addr, prefix_len: u8) -> Self {
        Self {
            network,
            prefix_len,
        }
    }

    fn mask(&self) -> u32 {
        if self.prefix_len >= 32 {
            return u32::MAX;
        }
        u32::MAX.checked_shl(32 - self.prefix_len as u32).unwrap_or(0)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        let mask = self.mask();
        (u32::from(ip) & mask) == (u32::from(self.network) & mask)
    }
}

/// 非公网网段：私有、回环、链路本地、文档、CGNAT、基准测试、组播及保留
const NON_PUBLIC_V4: [Ipv4Net; 13] = [
    Ipv4Net::new(Ipv4Addr::new(0, 0, 0, 0), 8),
    Ipv4Net::new(Ipv4Addr::new(10, 0, 0, 0), 8),
    Ipv4Net::new(Ipv4Addr::new(100, 64, 0, 0), 10),
    Ipv4Net::new(Ipv4Addr::new(127, 0, 0, 0), 8),
    Ipv4Net::new(Ipv4Addr::new(169, 254, 0, 0), 16),
    Ipv4Net::new(Ipv4Addr::new(172, 16, 0, 0), 12),
    Ipv4Net::new(Ipv4Addr::new(192, 0, 0, 0), 24),
    Ipv4Net::new(Ipv4Addr::new(192, 0, 2, 0), 24),
    Ipv4Net::new(Ipv4Addr::new(192, 168, 0, 0), 16),
    Ipv4Net::new(Ipv4Addr::new(198, 18, 0, 0), 15),
    Ipv4Net::new(Ipv4Addr::new(198, 51, 100, 0), 24),
    Ipv4Net::new(Ipv4Addr::new(203, 0, 113, 0), 24),
    Ipv4Net::new(Ipv4Addr::new(224, 0, 0, 0), 3),
];

/// Public unicast IPv4: outside every private, local and reserved range.
pub fn is_public_v4(ip: Ipv4Addr) -> bool {
    !NON_PUBLIC_V4.iter().any(|net| net.contains(ip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_and_local_rejected() {
        for ip in ["10.0.0.1", "172.16.0.1", "172.31.255.255", "192.168.1.1", "127.0.0.1"] {
            assert!(!is_public_v4(ip.parse().unwrap()), "{}", ip);
        }
        assert!(is_public_v4("172.32.0.1".parse().unwrap()));
    }

    #[test]
    fn test_reserved_ranges_rejected() {
        for ip in ["0.1.2.3", "100.64.0.1", "169.254.1.1", "198.51.100.7", "224.0.0.1", "255.255.255.255"] {
            assert!(!is_public_v4(ip.parse().unwrap()), "{}", ip);
        }
    }

    #[test]
    fn test_public_addresses_accepted() {
        for ip in ["8.8.8.8", "1.1.1.1", "93.184.216.34", "223.255.255.254"] {
            assert!(is_public_v4(ip.parse().unwrap()), "{}", ip);
        }
    }

    #[test]
    fn test_net_contains_by_prefix() {
        let net = Ipv4Net::new(Ipv4Addr::new(192, 168, 0, 0), 16);
        assert!(net.contains(Ipv4Addr::new(192, 168, 1, 100)));
        assert!(!net.contains(Ipv4Addr::new(192, 169, 0, 1)));

        let host = Ipv4Net::new(Ipv4Addr::new(8, 8, 8, 8), 32);
        assert!(host.contains(Ipv4Addr::new(8, 8, 8, 8)));
        assert!(!host.contains(Ipv4Addr::new(8, 8, 8, 9)));

        let everything = Ipv4Net::new(Ipv4Addr::new(0, 0, 0, 0), 0);
        assert!(everything.contains(Ipv4Addr::new(203, 0, 114, 1)));
    }
}
