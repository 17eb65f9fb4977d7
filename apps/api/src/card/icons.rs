//! Tech icon resolution — maps tech stack names to display icon URLs.
//!
//! Pluggable via the `TechIconResolver` trait, carried in `AppState` as
//! `Arc<dyn TechIconResolver>`. The default `DeviconResolver` is a pure
//! mapping onto the devicon CDN; a probing resolver that verifies each URL
//! exists can be swapped in without touching the card or handlers.

use async_trait::async_trait;
use serde::Serialize;

const DEVICON_BASE_URL: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";
/// Served from the app's static assets; shown for unrecognized technologies.
const FALLBACK_ICON: &str = "/tech.svg";

/// A resolved technology icon: the original tech name plus its icon URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechIcon {
    pub tech: String,
    pub url: String,
}

/// The icon resolver trait. Implement this to swap resolution backends
/// without touching the card builder or handlers.
#[async_trait]
pub trait TechIconResolver: Send + Sync {
    async fn resolve(&self, tech_stack: &[String]) -> Vec<TechIcon>;
}

/// Pure devicon CDN resolver. Fast, deterministic, no network calls.
pub struct DeviconResolver;

#[async_trait]
impl TechIconResolver for DeviconResolver {
    async fn resolve(&self, tech_stack: &[String]) -> Vec<TechIcon> {
        tech_stack
            .iter()
            .map(|tech| TechIcon {
                tech: tech.clone(),
                url: icon_url(tech),
            })
            .collect()
    }
}

/// Builds the devicon URL for a tech name, falling back to the generic icon
/// for names with no known devicon slug.
fn icon_url(tech: &str) -> String {
    match devicon_slug(tech) {
        Some(slug) => format!("{DEVICON_BASE_URL}/{slug}/{slug}-original.svg"),
        None => FALLBACK_ICON.to_string(),
    }
}

/// Maps a raw tech name to its devicon slug.
/// Normalization: lowercase, strip whitespace and a trailing ".js"/" js".
fn devicon_slug(tech: &str) -> Option<&'static str> {
    let normalized: String = tech
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
        .collect();
    let normalized = normalized.strip_suffix("js").unwrap_or(&normalized);

    let slug = match normalized {
        "react" => "react",
        "next" | "nextjs" => "nextjs",
        "node" | "nodejs" => "nodejs",
        "vue" => "vuejs",
        "express" => "express",
        "typescript" | "ts" => "typescript",
        "javascript" | "" => "javascript", // "js" normalizes to ""
        "python" => "python",
        "rust" => "rust",
        "go" | "golang" => "go",
        "java" => "java",
        "angular" => "angularjs",
        "svelte" => "svelte",
        "tailwind" | "tailwindcss" => "tailwindcss",
        "postgres" | "postgresql" => "postgresql",
        "mongodb" | "mongo" => "mongodb",
        "mysql" => "mysql",
        "redis" => "redis",
        "docker" => "docker",
        "kubernetes" | "k8s" => "kubernetes",
        "aws" | "amazonwebservices" => "amazonwebservices",
        "firebase" => "firebase",
        "graphql" => "graphql",
        "django" => "django",
        "flask" => "flask",
        "spring" | "springboot" => "spring",
        "kotlin" => "kotlin",
        "swift" => "swift",
        "flutter" => "flutter",
        "csharp" | "c#" => "csharp",
        "cplusplus" | "c++" => "cplusplus",
        _ => return None,
    };
    Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolver_keeps_original_tech_names() {
        let icons = DeviconResolver
            .resolve(&["React".to_string(), "Node.js".to_string()])
            .await;
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].tech, "React");
        assert_eq!(icons[1].tech, "Node.js");
    }

    #[test]
    fn test_known_slug_builds_cdn_url() {
        assert_eq!(
            icon_url("React"),
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/react/react-original.svg"
        );
    }

    #[test]
    fn test_js_suffix_and_case_are_normalized() {
        assert_eq!(devicon_slug("Next.js"), Some("nextjs"));
        assert_eq!(devicon_slug("NODE JS"), Some("nodejs"));
        assert_eq!(devicon_slug("TypeScript"), Some("typescript"));
    }

    #[test]
    fn test_unknown_tech_falls_back_to_generic_icon() {
        assert_eq!(icon_url("COBOL-74"), FALLBACK_ICON);
    }
}
