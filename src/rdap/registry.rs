//! Static TLD to RDAP server mapping.

/// Get the RDAP base URL for a TLD.
///
/// Accepts the TLD with or without its leading dot (`".io"` or `"io"`).
/// Only the last label is considered, so `".co.uk"` resolves through `"uk"`.
/// Returned URL ends with `/`.
pub fn rdap_base_url(tld: &str) -> Option<&'static str> {
    let tld = tld.rsplit('.').next()?.to_ascii_lowercase();
    match tld.as_str() {
        "com" => Some("https://rdap.verisign.com/com/v1/"),
        "net" => Some("https://rdap.verisign.com/net/v1/"),
        "org" => Some("https://rdap.publicinterestregistry.org/rdap/"),
        "io" => Some("https://rdap.nic.io/"),
        "ai" => Some("https://rdap.nic.ai/"),
        "co" => Some("https://rdap.nic.co/"),
        "me" => Some("https://rdap.nic.me/"),
        "xyz" => Some("https://rdap.nic.xyz/"),
        "tech" => Some("https://rdap.nic.tech/"),
        "app" | "dev" | "page" => Some("https://rdap.nic.google/"),
        "shop" => Some("https://rdap.nic.shop/"),
        "store" => Some("https://rdap.nic.store/"),
        "online" => Some("https://rdap.nic.online/"),
        "site" => Some("https://rdap.nic.site/"),
        _ => None,
    }
}

/// Build the RDAP domain query URL for a fully-qualified domain (e.g. `novahive.com`).
pub fn rdap_domain_url(domain: &str) -> Option<String> {
    let base = rdap_base_url(domain)?;
    Some(format!("{base}domain/{}", domain.to_ascii_lowercase()))
}
