//! Hyperlinks: `a` and `area`

use url::Url;

use super::ElementView;
use crate::attribute::parse_url;

/// Ports omitted from `host`
const DEFAULT_PORTS: &[(&str, u16)] = &[("http", 80), ("https", 443), ("ftp", 21)];

/// URL decomposition of the `href` attribute
///
/// Parts of an `href` that cannot be resolved to an absolute URL read as
/// empty strings.
pub trait HrefCapable: ElementView {
    /// `href` resolved against the base URL
    fn href(&self) -> String {
        self.element().attr_as_url("href")
    }

    fn href_url(&self) -> Option<Url> {
        let elem = self.element();
        parse_url(elem.selection().base_url(), elem.attr("href")?)
    }

    /// `#fragment`, or ""
    fn hash(&self) -> String {
        match self.href_url().as_ref().and_then(Url::fragment) {
            Some(f) if !f.is_empty() => format!("#{f}"),
            _ => String::new(),
        }
    }

    /// Host with a non-default port
    fn host(&self) -> String {
        let Some(url) = self.href_url() else {
            return String::new();
        };
        let Some(host) = url.host_str() else {
            return String::new();
        };
        let default = DEFAULT_PORTS
            .iter()
            .find(|(scheme, _)| *scheme == url.scheme())
            .map(|&(_, port)| port);
        match url.port() {
            Some(port) if Some(port) != default => format!("{host}:{port}"),
            _ => host.to_string(),
        }
    }

    fn hostname(&self) -> String {
        self.href_url()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Explicit port, or ""
    fn port(&self) -> String {
        self.href_url()
            .and_then(|u| u.port())
            .map(|p| p.to_string())
            .unwrap_or_default()
    }

    fn username(&self) -> String {
        self.href_url()
            .map(|u| u.username().to_string())
            .unwrap_or_default()
    }

    fn password(&self) -> String {
        self.href_url()
            .and_then(|u| u.password().map(str::to_string))
            .unwrap_or_default()
    }

    /// `scheme://host`; the whole href for `file:` URLs
    fn origin(&self) -> String {
        let Some(url) = self.href_url() else {
            return String::new();
        };
        if url.scheme() == "file" {
            return self.href();
        }
        format!("{}://{}", url.scheme(), self.host())
    }

    fn pathname(&self) -> String {
        self.href_url()
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }

    /// URL scheme without the colon; ":" when there is none
    fn protocol(&self) -> String {
        self.href_url()
            .map(|u| u.scheme().to_string())
            .unwrap_or_else(|| ":".to_string())
    }

    /// `?query`, or ""
    fn search(&self) -> String {
        match self.href_url().as_ref().and_then(Url::query) {
            Some(q) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        }
    }

    fn rel_list(&self) -> Vec<String> {
        self.element().split_attr("rel")
    }

    fn text(&self) -> String {
        self.element().text_content()
    }

    fn download(&self) -> String {
        self.element().attr_as_string("download")
    }

    fn rel(&self) -> String {
        self.element().attr_as_string("rel")
    }

    fn target(&self) -> String {
        self.element().attr_as_string("target")
    }

    fn hreflang(&self) -> String {
        self.element().attr_as_string("hreflang")
    }

    fn media(&self) -> String {
        self.element().attr_as_string("media")
    }

    fn type_(&self) -> String {
        self.element().attr_as_string("type")
    }

    fn referrer_policy(&self) -> String {
        self.element().attr_as_string("referrerpolicy")
    }

    fn access_key(&self) -> String {
        self.element().attr_as_string("accesskey")
    }
}

element_views! {
    /// `<a>`
    AnchorElement => as_anchor ["a"];
    /// `<area>`
    AreaElement => as_area ["area"];
}

impl HrefCapable for AnchorElement<'_> {}

impl HrefCapable for AreaElement<'_> {}

impl AreaElement<'_> {
    pub fn alt(&self) -> String {
        self.attr_as_string("alt")
    }

    pub fn coords(&self) -> String {
        self.attr_as_string("coords")
    }

    pub fn shape(&self) -> &'static str {
        self.attr_as_enum("shape", &["rect", "circle", "poly", "default"])
    }
}
