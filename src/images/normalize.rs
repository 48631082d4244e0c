// Image reference cleanup for display

/// Public registry prefixes that are always stripped, checked in this order
pub(crate) const PUBLIC_REGISTRY_PREFIXES: &[&str] = &[
    "registry-1.docker.io/library/",
    "registry-1.docker.io/",
    "docker.io/library/",
    "docker.io/",
    "index.docker.io/library/",
    "index.docker.io/",
    "hub.docker.com/library/",
    "hub.docker.com/",
    "registry.hub.docker.com/library/",
    "registry.hub.docker.com/",
];

/// Strip redundant registry prefixes from an image reference
///
/// With a non-empty `proxy_registry_domain`, the proxy's `/proxy/<app>/`,
/// `/anonymous/` and `/library/` wrappers are removed first. Docker Hub
/// prefixes are removed regardless. An empty `proxy_registry_domain` leaves
/// proxy wrapping untouched, which is how `--keep-proxy` is implemented.
///
/// The reference is never parsed; only whole prefixes are matched, and every
/// check runs against the result of the previous one.
pub fn clean_image_name(image: &str, proxy_registry_domain: &str) -> String {
    let mut cleaned = image.to_string();

    if !proxy_registry_domain.is_empty() {
        let proxy_prefix = format!("{}/proxy/", proxy_registry_domain);
        if let Some(rest) = cleaned.strip_prefix(&proxy_prefix) {
            // Drop the app slug the proxy injects. A remainder without another
            // '/' is left alone, prefix included.
            if let Some((_app_slug, upstream)) = rest.split_once('/') {
                cleaned = upstream.to_string();
            }
        }

        let anonymous_prefix = format!("{}/anonymous/", proxy_registry_domain);
        if let Some(rest) = cleaned.strip_prefix(&anonymous_prefix) {
            cleaned = rest.to_string();
        }

        let library_prefix = format!("{}/library/", proxy_registry_domain);
        if let Some(rest) = cleaned.strip_prefix(&library_prefix) {
            cleaned = rest.to_string();
        }
    }

    for prefix in PUBLIC_REGISTRY_PREFIXES {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.to_string();
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_registry_with_app_name() {
        assert_eq!(
            clean_image_name(
                "images.shortrib.io/proxy/testapp/ghcr.io/example/app:v1.0.0",
                "images.shortrib.io"
            ),
            "ghcr.io/example/app:v1.0.0"
        );
    }

    #[test]
    fn test_docker_hub_library_prefix() {
        assert_eq!(
            clean_image_name("docker.io/library/postgres:14", ""),
            "postgres:14"
        );
    }

    #[test]
    fn test_index_docker_io_prefix() {
        assert_eq!(
            clean_image_name("index.docker.io/replicated/replicated-sdk:1.0.0-beta.32", ""),
            "replicated/replicated-sdk:1.0.0-beta.32"
        );
    }

    #[test]
    fn test_proxy_kept_without_domain() {
        let image = "images.shortrib.io/proxy/testapp/ghcr.io/example/app:v1.0.0";
        assert_eq!(clean_image_name(image, ""), image);
    }

    #[test]
    fn test_proxy_library_prefix() {
        assert_eq!(
            clean_image_name("myproxy.com/library/nginx:latest", "myproxy.com"),
            "nginx:latest"
        );
        assert_eq!(
            clean_image_name(
                "proxy.replicated.com/library/replicated-sdk-image:1.7.1",
                "proxy.replicated.com"
            ),
            "replicated-sdk-image:1.7.1"
        );
    }

    #[test]
    fn test_proxy_anonymous_prefix() {
        assert_eq!(
            clean_image_name("myproxy.com/anonymous/redis:7.0", "myproxy.com"),
            "redis:7.0"
        );
    }

    #[test]
    fn test_anonymous_prefix_then_docker_hub() {
        assert_eq!(
            clean_image_name(
                "images.shortrib.io/anonymous/index.docker.io/library/nginx:1.25.3",
                "images.shortrib.io"
            ),
            "nginx:1.25.3"
        );
    }

    #[test]
    fn test_no_matching_prefix() {
        assert_eq!(
            clean_image_name("ghcr.io/myorg/myapp:v1.0.0", ""),
            "ghcr.io/myorg/myapp:v1.0.0"
        );
        assert_eq!(
            clean_image_name("ghcr.io/myorg/myapp:v1.0.0", "myproxy.com"),
            "ghcr.io/myorg/myapp:v1.0.0"
        );
    }

    #[test]
    fn test_proxy_prefix_without_upstream_path_is_unchanged() {
        assert_eq!(
            clean_image_name("myproxy.com/proxy/myapp", "myproxy.com"),
            "myproxy.com/proxy/myapp"
        );
    }

    #[test]
    fn test_proxy_then_docker_hub_prefix() {
        assert_eq!(
            clean_image_name(
                "myproxy.com/proxy/myapp/docker.io/library/nginx:1.27",
                "myproxy.com"
            ),
            "nginx:1.27"
        );
    }

    #[test]
    fn test_other_proxy_domain_not_stripped() {
        assert_eq!(
            clean_image_name("other.com/proxy/myapp/nginx:latest", "myproxy.com"),
            "other.com/proxy/myapp/nginx:latest"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(clean_image_name("", ""), "");
        assert_eq!(clean_image_name("", "myproxy.com"), "");
        assert_eq!(clean_image_name("docker.io/", ""), "");
    }

    #[test]
    fn test_public_registry_strip_is_idempotent() {
        let images = [
            "docker.io/library/postgres:14",
            "registry-1.docker.io/library/busybox:1.36",
            "hub.docker.com/bitnami/redis:7",
            "registry.hub.docker.com/library/alpine:3.20",
            "index.docker.io/replicated/replicated-sdk:1.0.0-beta.32",
            "quay.io/prometheus/node-exporter:v1.8.0",
            "images.shortrib.io/proxy/testapp/ghcr.io/example/app:v1.0.0",
        ];

        for image in images {
            let once = clean_image_name(image, "");
            assert_eq!(clean_image_name(&once, ""), once, "input: {}", image);
        }
    }

    #[test]
    fn test_every_public_prefix_is_stripped() {
        for prefix in PUBLIC_REGISTRY_PREFIXES {
            let image = format!("{}myorg/tool:1.0", prefix);
            assert_eq!(clean_image_name(&image, ""), "myorg/tool:1.0", "prefix: {}", prefix);
        }
    }
}
