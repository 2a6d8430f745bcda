use std::net::IpAddr;

use axum::http::{HeaderMap, Uri, header};
use launchpad_application::TenantSource;

const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Scheme and authority the client used to reach this service.
pub fn request_authority(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = headers
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}")
}

/// Absolute URL of the current request.
pub fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    let path_and_query = uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or("/");
    format!("{}{path_and_query}", request_authority(headers, uri))
}

/// Local development reads tenants from the control plane directly.
///
/// The inbound authority only picks the source; the hosted endpoint itself
/// comes from configuration.
pub fn tenant_source(headers: &HeaderMap, uri: &Uri) -> TenantSource {
    if is_loopback_authority(request_authority(headers, uri).as_str()) {
        TenantSource::Loopback
    } else {
        TenantSource::Hosted
    }
}

fn is_loopback_authority(authority: &str) -> bool {
    let host = authority
        .split_once("://")
        .map_or(authority, |(_, rest)| rest);
    let host = if let Some(bracketed) = host.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or_default()
    } else {
        host.split(':').next().unwrap_or_default()
    };

    host.eq_ignore_ascii_case("localhost")
        || host
            .parse::<IpAddr>()
            .is_ok_and(|address| address.is_loopback())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, Uri, header};
    use launchpad_application::TenantSource;

    use super::{request_url, tenant_source};

    fn headers(host: &str, proto: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::HOST,
            HeaderValue::from_str(host).unwrap_or_else(|_| unreachable!()),
        );
        if let Some(proto) = proto {
            headers.insert(
                "x-forwarded-proto",
                HeaderValue::from_str(proto).unwrap_or_else(|_| unreachable!()),
            );
        }
        headers
    }

    #[test]
    fn loopback_hosts_use_control_plane_listing() {
        let uri = Uri::from_static("/api/tenants");
        for host in ["localhost:3001", "127.0.0.1", "[::1]:8080", "LOCALHOST"] {
            assert_eq!(
                tenant_source(&headers(host, None), &uri),
                TenantSource::Loopback,
                "{host}"
            );
        }
    }

    #[test]
    fn public_hosts_use_tenant_details() {
        let uri = Uri::from_static("/api/tenants");
        assert_eq!(
            tenant_source(&headers("deploy.contoso.com", Some("https")), &uri),
            TenantSource::Hosted
        );
        assert_eq!(
            tenant_source(&headers("0.0.0.0:3001", None), &uri),
            TenantSource::Hosted
        );
    }

    #[test]
    fn request_url_keeps_path_and_query() {
        let uri = Uri::from_static("/api/tenants/abc?x=1");
        assert_eq!(
            request_url(&headers("deploy.contoso.com", Some("https, http")), &uri),
            "https://deploy.contoso.com/api/tenants/abc?x=1"
        );
    }
}
