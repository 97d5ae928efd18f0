/// Decides which `Host` header values the server answers to.
///
/// Patterns are exact host names, `*` for any host, or a leading-dot domain
/// (`.example.com`) matching the domain and all of its subdomains. Ports are
/// ignored. With no patterns, debug mode falls back to the loopback names and
/// production mode rejects everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPolicy {
    patterns: Vec<String>,
}

const DEBUG_HOSTS: &[&str] = &[".localhost", "127.0.0.1", "[::1]"];

impl HostPolicy {
    pub fn new(allowed: &[String], debug: bool) -> Self {
        let mut patterns: Vec<String> = allowed
            .iter()
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        if patterns.is_empty() && debug {
            patterns = DEBUG_HOSTS.iter().map(|h| h.to_string()).collect();
        }
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn allows(&self, host_header: &str) -> bool {
        let host = strip_port(host_header.trim()).to_ascii_lowercase();
        let host = host.strip_suffix('.').unwrap_or(&host);
        if host.is_empty() {
            return false;
        }
        self.patterns.iter().any(|pattern| matches(pattern, host))
    }
}

fn matches(pattern: &str, host: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match pattern.strip_prefix('.') {
        Some(domain) => host == domain || host.ends_with(pattern),
        None => host == pattern,
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
