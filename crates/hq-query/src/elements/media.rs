//! Embedded content: media, images, canvas and image maps

use super::ElementView;
use crate::Element;

element_views! {
    /// `<audio>` or `<video>`
    MediaElement => as_media ["audio", "video"];
    /// `<img>`
    ImageElement => as_image ["img"];
    /// `<canvas>`
    CanvasElement => as_canvas ["canvas"];
    /// `<map>`
    MapElement => as_map ["map"];
}

impl MediaElement<'_> {
    /// `src` resolved against the base URL
    pub fn src(&self) -> String {
        self.attr_as_url("src")
    }

    pub fn current_src(&self) -> String {
        self.src()
    }

    pub fn text_tracks(&self) -> Vec<Element> {
        self.find_all("track")
    }

    pub fn autoplay(&self) -> bool {
        self.attr_is_present("autoplay")
    }

    pub fn controls(&self) -> bool {
        self.attr_is_present("controls")
    }

    pub fn loop_(&self) -> bool {
        self.attr_is_present("loop")
    }

    pub fn muted(&self) -> bool {
        self.attr_is_present("muted")
    }

    pub fn preload(&self) -> &'static str {
        self.attr_as_enum("preload", &["auto", "metadata", "none"])
    }

    pub fn cross_origin(&self) -> Option<&'static str> {
        cross_origin(self.element())
    }
}

/// `anonymous` or `use-credentials`; `None` when unset
fn cross_origin(elem: &Element) -> Option<&'static str> {
    elem.attr("crossorigin")?;
    Some(elem.attr_as_enum("crossorigin", &["anonymous", "use-credentials"]))
}

impl ImageElement<'_> {
    pub fn src(&self) -> String {
        self.attr_as_url("src")
    }

    pub fn current_src(&self) -> String {
        self.src()
    }

    pub fn alt(&self) -> String {
        self.attr_as_string("alt")
    }

    pub fn width(&self) -> i64 {
        self.attr_as_int("width", 0)
    }

    pub fn height(&self) -> i64 {
        self.attr_as_int("height", 0)
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }

    pub fn sizes(&self) -> String {
        self.attr_as_string("sizes")
    }

    pub fn srcset(&self) -> String {
        self.attr_as_string("srcset")
    }

    pub fn use_map(&self) -> String {
        self.attr_as_string("usemap")
    }

    pub fn is_map(&self) -> bool {
        self.attr_is_present("ismap")
    }

    pub fn cross_origin(&self) -> Option<&'static str> {
        cross_origin(self.element())
    }

    pub fn referrer_policy(&self) -> String {
        self.attr_as_string("referrerpolicy")
    }
}

impl CanvasElement<'_> {
    pub fn width(&self) -> i64 {
        self.attr_as_int("width", 150)
    }

    pub fn height(&self) -> i64 {
        self.attr_as_int("height", 150)
    }
}

impl MapElement<'_> {
    /// `name`, else `id`
    pub fn name(&self) -> String {
        match self.attr("name") {
            Some(name) => name.to_string(),
            None => self.id(),
        }
    }

    pub fn areas(&self) -> Vec<Element> {
        self.find_all("area")
    }

    /// Images and objects pointing at this map through `usemap`
    pub fn images(&self) -> Vec<Element> {
        let name = self.name();
        if name.is_empty() {
            return Vec::new();
        }
        let target = format!("#{name}");
        self.document_find("img,object")
            .get_all()
            .into_iter()
            .filter(|e| e.attr("usemap") == Some(target.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_html, parse_html_with_url};

    const MEDIA: &str = r##"
        <video id="v" src="movie.mp4" controls preload="bogus">
            <track kind="subtitles" src="en.vtt"><track kind="captions" src="de.vtt">
        </video>
        <audio id="a" crossorigin></audio>
        <img id="i" src="/pic.png" alt="Pic" width="64" height="x" usemap="#m" crossorigin="use-credentials">
        <object id="o" usemap="#m"></object>
        <img id="other" usemap="#elsewhere">
        <canvas id="c1"></canvas><canvas id="c2" width="300" height="200"></canvas>
        <map id="m"><area href="/a"><area href="/b"></map>
    "##;

    fn doc() -> crate::Selection {
        parse_html_with_url(MEDIA, "http://example.com/media/").unwrap()
    }

    #[test]
    fn test_media() {
        let v = doc().find("#v").get(0).unwrap();
        let video = v.as_media().unwrap();
        assert_eq!(video.src(), "http://example.com/media/movie.mp4");
        assert_eq!(video.text_tracks().len(), 2);
        assert!(video.controls());
        assert!(!video.autoplay());
        assert_eq!(video.preload(), "auto");
        assert_eq!(video.cross_origin(), None);

        let a = doc().find("#a").get(0).unwrap();
        assert_eq!(a.as_media().unwrap().cross_origin(), Some("anonymous"));
        assert_eq!(a.as_media().unwrap().src(), "");
    }

    #[test]
    fn test_image() {
        let i = doc().find("#i").get(0).unwrap();
        let img = i.as_image().unwrap();
        assert_eq!(img.src(), "http://example.com/pic.png");
        assert_eq!(img.alt(), "Pic");
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 0);
        assert_eq!(img.use_map(), "#m");
        assert_eq!(img.cross_origin(), Some("use-credentials"));
    }

    #[test]
    fn test_canvas_defaults() {
        let doc = parse_html(MEDIA).unwrap();
        let c1 = doc.find("#c1").get(0).unwrap();
        assert_eq!(c1.as_canvas().unwrap().width(), 150);
        assert_eq!(c1.as_canvas().unwrap().height(), 150);
        let c2 = doc.find("#c2").get(0).unwrap();
        assert_eq!(c2.as_canvas().unwrap().width(), 300);
        assert_eq!(c2.as_canvas().unwrap().height(), 200);
    }

    #[test]
    fn test_map() {
        let m = doc().find("#m").get(0).unwrap();
        let map = m.as_map().unwrap();
        assert_eq!(map.name(), "m");
        assert_eq!(map.areas().len(), 2);
        let ids: Vec<_> = map.images().iter().map(Element::id).collect();
        assert_eq!(ids, vec!["i", "o"]);
    }
}
