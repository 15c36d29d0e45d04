/// Master endpoint of a cluster, `host:port`.
///
/// Used by the administration interface and by the read descriptor alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Master {
    host: String,
    port: u16,
}

impl Master {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }
    /// Parses `host` or `host:port`, defaulting to [`crate::MASTER_PORT`].
    pub fn parse(s: &str) -> crate::Result<Self> {
        let s = s.trim();
        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) => (
                host,
                port.parse::<u16>()
                    .map_err(|e| crate::Error::Connection(format!("bad port in {}: {}", s, e)))?,
            ),
            None => (s, crate::MASTER_PORT),
        };
        if host.is_empty() {
            return Err(crate::Error::Connection(format!("no host in {:?}", s)));
        }
        Ok(Self::new(host, port))
    }
    pub fn host(&self) -> &str {
        &self.host
    }
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Master {
    fn default() -> Self {
        Self::new(crate::MASTER_HOST, crate::MASTER_PORT)
    }
}

impl std::str::FromStr for Master {
    type Err = crate::Error;
    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Master {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_applies() {
        let master = Master::parse("quickstart.cloudera").unwrap();
        assert_eq!(master.to_string(), "quickstart.cloudera:7051");
        assert_eq!(master, Master::default());
    }

    #[test]
    fn explicit_port_wins() {
        let master = Master::parse("localhost:5432").unwrap();
        assert_eq!(master.host(), "localhost");
        assert_eq!(master.port(), 5432);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Master::parse(":7051").is_err());
        assert!(Master::parse("host:port").is_err());
        assert!(Master::parse("").is_err());
    }
}
