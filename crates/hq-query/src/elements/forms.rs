//! Forms and form controls

use super::ElementView;
use crate::attribute::resolve_url;
use crate::form::{options, value_or_html};
use crate::{Element, Selection, SelectorArg};

/// Controls listed by `form.elements`
const FORM_CONTROLS: &str = "input,select,button,textarea,fieldset";

/// A control that belongs to a form and can be labelled
pub trait FormAssociated: ElementView {
    /// Enclosing `form`, or the form named by the `form` attribute
    fn form(&self) -> Option<Element> {
        owner_form(self.element())
    }

    /// Wrapping `label` plus every `label[for=<id>]`
    fn labels(&self) -> Vec<Element> {
        let elem = self.element();
        let wrapping = elem.selection().closest("label");
        let id = elem.attr_as_string("id");
        if id.is_empty() {
            return wrapping.get_all();
        }
        let points_here = |_: usize, label: &Selection| label.attr("for") == Some(id.as_str());
        let by_for = elem
            .document_find("label")
            .filter(SelectorArg::Func(&points_here));
        wrapping.add(&by_for).get_all()
    }
}

fn owner_form(elem: &Element) -> Option<Element> {
    if let Some(form) = elem.ancestor("form") {
        return Some(form);
    }
    let form_id = elem.attr("form").filter(|id| !id.is_empty())?;
    let doc = elem.selection().document();
    let found = doc.get_element_by_id(form_id)?;
    doc.tree()
        .is_tag(found, "form")
        .then(|| elem.selection().element_at(found))
}

/// Submission settings a control can override with `form*` attributes
pub trait FormField: FormAssociated {
    /// `form<name>` on the control, else `<name>` on its form
    fn form_or_own_attr(&self, name: &str) -> Option<String> {
        let elem = self.element();
        if let Some(own) = elem.attr(&format!("form{name}")) {
            return Some(own.to_string());
        }
        self.form()?.attr(name).map(str::to_string)
    }

    /// Submission URL; the base URL when no action is set
    fn form_action(&self) -> String {
        let base = self.element().selection().base_url();
        let action = self.form_or_own_attr("action");
        if base.is_empty() {
            return action.unwrap_or_default();
        }
        match action {
            Some(action) if !action.is_empty() => resolve_url(base, &action),
            _ => base.to_string(),
        }
    }

    fn form_enctype(&self) -> String {
        match self.form_or_own_attr("enctype").as_deref() {
            Some(e @ ("multipart/form-data" | "text/plain")) => e.to_string(),
            _ => "application/x-www-form-urlencoded".to_string(),
        }
    }

    /// `post` or `get`
    fn form_method(&self) -> &'static str {
        match self.form_or_own_attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => "post",
            _ => "get",
        }
    }

    fn form_no_validate(&self) -> bool {
        self.form_or_own_attr("novalidate").is_some()
    }

    fn form_target(&self) -> String {
        self.form_or_own_attr("target").unwrap_or_default()
    }

    fn name(&self) -> String {
        self.element().attr_as_string("name")
    }
}

element_views! {
    /// `<form>`
    FormElement => as_form ["form"];
    /// `<button>`
    ButtonElement => as_button ["button"];
    /// `<input>`
    InputElement => as_input ["input"];
    /// `<select>`
    SelectElement => as_select ["select"];
    /// `<option>`
    OptionElement => as_option ["option"];
    /// `<textarea>`
    TextAreaElement => as_textarea ["textarea"];
    /// `<fieldset>`
    FieldSetElement => as_fieldset ["fieldset"];
    /// `<label>`
    LabelElement => as_label ["label"];
    /// `<legend>`
    LegendElement => as_legend ["legend"];
    /// `<output>`
    OutputElement => as_output ["output"];
    /// `<keygen>`
    KeygenElement => as_keygen ["keygen"];
    /// `<object>`
    ObjectElement => as_object ["object"];
    /// `<meter>`
    MeterElement => as_meter ["meter"];
    /// `<progress>`
    ProgressElement => as_progress ["progress"];
    /// `<datalist>`
    DataListElement => as_datalist ["datalist"];
}

impl FormAssociated for ButtonElement<'_> {}
impl FormField for ButtonElement<'_> {}
impl FormAssociated for InputElement<'_> {}
impl FormField for InputElement<'_> {}
impl FormAssociated for SelectElement<'_> {}
impl FormAssociated for TextAreaElement<'_> {}
impl FormAssociated for FieldSetElement<'_> {}
impl FormAssociated for LabelElement<'_> {}
impl FormAssociated for LegendElement<'_> {}
impl FormAssociated for OutputElement<'_> {}
impl FormAssociated for KeygenElement<'_> {}
impl FormAssociated for ObjectElement<'_> {}
impl FormAssociated for MeterElement<'_> {}
impl FormAssociated for ProgressElement<'_> {}

impl FormElement<'_> {
    /// Descendant controls
    pub fn elements(&self) -> Vec<Element> {
        self.find_all(FORM_CONTROLS)
    }

    pub fn length(&self) -> usize {
        self.selection().find(FORM_CONTROLS).len()
    }

    /// `post` when set (case-sensitive), else `get`
    pub fn method(&self) -> &'static str {
        if self.attr("method") == Some("post") {
            "post"
        } else {
            "get"
        }
    }

    pub fn action(&self) -> String {
        self.attr_as_string("action")
    }

    pub fn enctype(&self) -> String {
        self.attr_as_string("enctype")
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }

    pub fn target(&self) -> String {
        self.attr_as_string("target")
    }

    pub fn accept_charset(&self) -> String {
        self.attr_as_string("accept-charset")
    }

    pub fn autocomplete(&self) -> String {
        self.attr_as_string("autocomplete")
    }

    pub fn no_validate(&self) -> bool {
        self.attr_is_present("novalidate")
    }
}

impl ButtonElement<'_> {
    pub fn value(&self) -> String {
        value_or_html(self.tree(), self.node_id())
    }

    pub fn type_(&self) -> &'static str {
        self.attr_as_enum("type", &["submit", "button", "menu", "reset"])
    }

    pub fn disabled(&self) -> bool {
        self.attr_is_present("disabled")
    }

    pub fn autofocus(&self) -> bool {
        self.attr_is_present("autofocus")
    }
}

/// Input types with a text default
const INPUT_TYPES: &[&str] = &[
    "text",
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "time",
    "url",
    "week",
];

impl InputElement<'_> {
    pub fn type_(&self) -> &'static str {
        self.attr_as_enum("type", INPUT_TYPES)
    }

    pub fn value(&self) -> String {
        self.attr_as_string("value")
    }

    pub fn default_value(&self) -> String {
        self.attr_as_string("value")
    }

    pub fn checked(&self) -> bool {
        self.attr_is_present("checked")
    }

    pub fn default_checked(&self) -> bool {
        self.attr_is_present("checked")
    }

    pub fn disabled(&self) -> bool {
        self.attr_is_present("disabled")
    }

    pub fn required(&self) -> bool {
        self.attr_is_present("required")
    }

    pub fn readonly(&self) -> bool {
        self.attr_is_present("readonly")
    }

    pub fn multiple(&self) -> bool {
        self.attr_is_present("multiple")
    }

    pub fn placeholder(&self) -> String {
        self.attr_as_string("placeholder")
    }

    pub fn pattern(&self) -> String {
        self.attr_as_string("pattern")
    }

    /// `maxlength`, -1 when unset
    pub fn max_length(&self) -> i64 {
        self.attr_as_int("maxlength", -1)
    }

    pub fn size(&self) -> i64 {
        self.attr_as_int("size", 0)
    }

    pub fn min(&self) -> String {
        self.attr_as_string("min")
    }

    pub fn max(&self) -> String {
        self.attr_as_string("max")
    }

    pub fn step(&self) -> String {
        self.attr_as_string("step")
    }

    pub fn src(&self) -> String {
        self.attr_as_url("src")
    }

    /// The `datalist` named by `list`; never for types that ignore suggestions
    pub fn list(&self) -> Option<Element> {
        let list_id = self.attr("list").filter(|id| !id.is_empty())?;
        if matches!(
            self.attr("type").unwrap_or(""),
            "hidden" | "checkbox" | "radio" | "file" | "button"
        ) {
            return None;
        }
        let doc = self.selection().document();
        let found = doc.get_element_by_id(list_id)?;
        doc.tree()
            .is_tag(found, "datalist")
            .then(|| self.selection().element_at(found))
    }
}

impl SelectElement<'_> {
    fn option_list(&self) -> Selection {
        self.selection().find("option")
    }

    pub fn options(&self) -> Vec<Element> {
        self.option_list().get_all()
    }

    pub fn length(&self) -> usize {
        self.option_list().len()
    }

    /// Index of the first `option[selected]`
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selection().find("option[selected]");
        selected.first().index_of(&self.option_list())
    }

    pub fn selected_options(&self) -> Vec<Element> {
        self.selection().find("option[selected]").get_all()
    }

    pub fn multiple(&self) -> bool {
        self.attr_is_present("multiple")
    }

    /// Rows shown: 4 for multi-selects, else 1
    pub fn size(&self) -> usize {
        if self.multiple() { 4 } else { 1 }
    }

    pub fn type_(&self) -> &'static str {
        if self.multiple() {
            "select-multiple"
        } else {
            "select-one"
        }
    }

    /// Value of the first selected option, "" when none is marked
    pub fn value(&self) -> String {
        let tree = self.tree();
        options(tree, self.node_id())
            .into_iter()
            .find(|&o| tree.has_attr(o, "selected"))
            .map(|o| value_or_html(tree, o))
            .unwrap_or_default()
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }

    pub fn disabled(&self) -> bool {
        self.attr_is_present("disabled")
    }

    pub fn required(&self) -> bool {
        self.attr_is_present("required")
    }

    pub fn autofocus(&self) -> bool {
        self.attr_is_present("autofocus")
    }
}

impl OptionElement<'_> {
    /// Disabled itself or through a disabled `optgroup`
    pub fn disabled(&self) -> bool {
        if self.attr_is_present("disabled") {
            return true;
        }
        self.ancestor("optgroup")
            .is_some_and(|group| group.attr_is_present("disabled"))
    }

    /// Enclosing form, or the form its `select` names
    pub fn form(&self) -> Option<Element> {
        if let Some(form) = self.ancestor("form") {
            return Some(form);
        }
        let select = self.ancestor("select")?;
        owner_form(&select)
    }

    /// Position among the options of the enclosing `select` or `datalist`
    pub fn index(&self) -> usize {
        self.ancestor("select,datalist")
            .and_then(|holder| self.position_in(&holder.selection().find("option")))
            .unwrap_or(0)
    }

    pub fn label(&self) -> String {
        match self.attr("label") {
            Some(label) => label.to_string(),
            None => self.text_content(),
        }
    }

    pub fn text(&self) -> String {
        self.text_content()
    }

    pub fn value(&self) -> String {
        value_or_html(self.tree(), self.node_id())
    }

    pub fn selected(&self) -> bool {
        self.attr_is_present("selected")
    }

    pub fn default_selected(&self) -> bool {
        self.attr_is_present("selected")
    }
}

impl TextAreaElement<'_> {
    pub fn value(&self) -> String {
        self.attr_as_string("value")
    }

    pub fn default_value(&self) -> String {
        self.attr_as_string("value")
    }

    /// Length of the `value` attribute
    pub fn length(&self) -> usize {
        self.value().len()
    }

    pub fn type_(&self) -> &'static str {
        "textarea"
    }

    pub fn rows(&self) -> i64 {
        self.attr_as_int("rows", 0)
    }

    pub fn cols(&self) -> i64 {
        self.attr_as_int("cols", 0)
    }

    pub fn max_length(&self) -> i64 {
        self.attr_as_int("maxlength", 0)
    }

    pub fn placeholder(&self) -> String {
        self.attr_as_string("placeholder")
    }

    pub fn read_only(&self) -> bool {
        self.attr_is_present("readonly")
    }

    pub fn required(&self) -> bool {
        self.attr_is_present("required")
    }

    pub fn wrap(&self) -> String {
        self.attr_as_string("wrap")
    }
}

impl FieldSetElement<'_> {
    pub fn type_(&self) -> &'static str {
        "fieldset"
    }

    pub fn elements(&self) -> Vec<Element> {
        self.find_all("input,select,button,textarea")
    }

    pub fn disabled(&self) -> bool {
        self.attr_is_present("disabled")
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }
}

impl LabelElement<'_> {
    pub fn html_for(&self) -> String {
        self.attr_as_string("for")
    }

    /// Element whose id is named by `for`
    pub fn control(&self) -> Option<Element> {
        let target = self.attr("for")?;
        let found = self.selection().document().get_element_by_id(target)?;
        Some(self.selection().element_at(found))
    }
}

impl LegendElement<'_> {
    pub fn access_key(&self) -> String {
        self.attr_as_string("accesskey")
    }
}

impl OutputElement<'_> {
    pub fn value(&self) -> String {
        self.text_content()
    }

    pub fn default_value(&self) -> String {
        self.text_content()
    }

    pub fn html_for(&self) -> String {
        self.attr_as_string("for")
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }

    pub fn type_(&self) -> &'static str {
        "output"
    }
}

impl KeygenElement<'_> {
    pub fn challenge(&self) -> String {
        self.attr_as_string("challenge")
    }

    pub fn keytype(&self) -> &'static str {
        self.attr_as_enum("keytype", &["RSA", "DSA", "EC"])
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }

    pub fn type_(&self) -> &'static str {
        "keygen"
    }
}

impl ObjectElement<'_> {
    pub fn data(&self) -> String {
        self.attr_as_url("data")
    }

    pub fn name(&self) -> String {
        self.attr_as_string("name")
    }

    pub fn type_(&self) -> String {
        self.attr_as_string("type")
    }

    pub fn use_map(&self) -> String {
        self.attr_as_string("usemap")
    }

    pub fn width(&self) -> String {
        self.attr_as_string("width")
    }

    pub fn height(&self) -> String {
        self.attr_as_string("height")
    }
}

impl MeterElement<'_> {
    pub fn min(&self) -> i64 {
        self.attr_as_int("min", 0)
    }

    pub fn max(&self) -> i64 {
        self.attr_as_int("max", 0)
    }

    pub fn low(&self) -> i64 {
        self.attr_as_int("low", 0)
    }

    pub fn high(&self) -> i64 {
        self.attr_as_int("high", 0)
    }

    pub fn optimum(&self) -> i64 {
        self.attr_as_int("optimum", 0)
    }
}

impl ProgressElement<'_> {
    fn number(&self, name: &str) -> Option<f64> {
        self.attr(name)?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| *v >= 0.0)
    }

    /// `max`, 1.0 when absent, negative or unparsable
    pub fn max(&self) -> f64 {
        self.number("max").unwrap_or(1.0)
    }

    /// `value / max`, 0.0 without a usable value
    pub fn value(&self) -> f64 {
        self.number("value").map_or(0.0, |v| v / self.max())
    }

    /// `value / max`, -1.0 for an indeterminate bar
    pub fn position(&self) -> f64 {
        self.number("value").map_or(-1.0, |v| v / self.max())
    }
}

impl DataListElement<'_> {
    pub fn options(&self) -> Vec<Element> {
        self.find_all("option")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_html, parse_html_with_url};

    const FORM: &str = r#"
        <form id="f" action="/submit" method="POST" enctype="text/plain" target="_blank">
            <label>Name <input id="name" name="user" maxlength="20"></label>
            <label for="name">Again</label>
            <input id="btnin" type="submit" formaction="/alt" formmethod="get">
            <button id="btn">Go <b>now</b></button>
            <select id="sel" name="s">
                <option>first</option>
                <optgroup disabled><option id="grouped" value="g">G</option></optgroup>
                <option id="picked" selected label="Picked!">second</option>
            </select>
            <textarea id="ta" value="abc">body</textarea>
            <fieldset id="fs"><input name="inner"><button>b</button></fieldset>
            <progress id="p1" max="4" value="1"></progress>
            <progress id="p2"></progress>
            <output id="out" for="name">42</output>
        </form>
        <input id="outside" form="f" list="dl" type="text">
        <datalist id="dl"><option value="x"></option><option value="y"></option></datalist>
        <select id="multi" multiple><option>a</option></select>
    "#;

    fn elem(html: &str, selector: &str) -> Element {
        parse_html(html).unwrap().find(selector).get(0).unwrap()
    }

    #[test]
    fn test_form_basics() {
        let f = elem(FORM, "#f");
        let form = f.as_form().unwrap();
        assert_eq!(form.method(), "get");
        assert_eq!(form.action(), "/submit");
        assert_eq!(form.length(), form.elements().len());
        assert_eq!(form.elements()[0].id(), "name");
    }

    #[test]
    fn test_owner_form_by_ancestor_and_attribute() {
        let inner = elem(FORM, "#name");
        assert_eq!(inner.as_input().unwrap().form().unwrap().id(), "f");
        let outside = elem(FORM, "#outside");
        assert_eq!(outside.as_input().unwrap().form().unwrap().id(), "f");
        let multi = elem(FORM, "#multi");
        assert!(multi.as_select().unwrap().form().is_none());
    }

    #[test]
    fn test_labels() {
        let input = elem(FORM, "#name");
        let labels = input.as_input().unwrap().labels();
        let texts: Vec<_> = labels.iter().map(Element::text_content).collect();
        assert_eq!(labels.len(), 2);
        assert!(texts[0].starts_with("Name"));
        assert_eq!(texts[1], "Again");
    }

    #[test]
    fn test_form_field_overrides() {
        let doc = parse_html_with_url(FORM, "http://example.com/page").unwrap();
        let btnin = doc.find("#btnin").get(0).unwrap();
        let field = btnin.as_input().unwrap();
        assert_eq!(field.form_action(), "http://example.com/alt");
        assert_eq!(field.form_method(), "get");
        assert_eq!(field.form_enctype(), "text/plain");
        assert_eq!(field.form_target(), "_blank");
        assert!(!field.form_no_validate());

        let name = doc.find("#name").get(0).unwrap();
        let field = name.as_input().unwrap();
        assert_eq!(field.form_action(), "http://example.com/submit");
        assert_eq!(field.form_method(), "post");
        assert_eq!(FormField::name(&field), "user");
    }

    #[test]
    fn test_form_action_without_action_uses_base() {
        let html = "<form><input id=i></form>";
        let doc = parse_html_with_url(html, "http://example.com/here").unwrap();
        let e = doc.find("#i").get(0).unwrap();
        assert_eq!(e.as_input().unwrap().form_action(), "http://example.com/here");
        let e = elem(html, "#i");
        assert_eq!(e.as_input().unwrap().form_action(), "");
    }

    #[test]
    fn test_button_value_falls_back_to_markup() {
        let b = elem(FORM, "#btn");
        let button = b.as_button().unwrap();
        assert_eq!(button.value(), "Go <b>now</b>");
        assert_eq!(button.type_(), "submit");
    }

    #[test]
    fn test_select() {
        let s = elem(FORM, "#sel");
        let select = s.as_select().unwrap();
        assert_eq!(select.length(), 3);
        assert_eq!(select.selected_index(), Some(2));
        assert_eq!(select.value(), "second");
        assert_eq!(select.selected_options().len(), 1);
        assert_eq!(select.size(), 1);
        assert_eq!(select.type_(), "select-one");

        let m = elem(FORM, "#multi");
        let multi = m.as_select().unwrap();
        assert_eq!(multi.size(), 4);
        assert_eq!(multi.type_(), "select-multiple");
        assert_eq!(multi.selected_index(), None);
        assert_eq!(multi.value(), "");
    }

    #[test]
    fn test_option() {
        let grouped = elem(FORM, "#grouped");
        let opt = grouped.as_option().unwrap();
        assert!(opt.disabled());
        assert_eq!(opt.index(), 1);
        assert_eq!(opt.value(), "g");
        assert_eq!(opt.form().unwrap().id(), "f");

        let picked = elem(FORM, "#picked");
        let opt = picked.as_option().unwrap();
        assert!(!opt.disabled());
        assert_eq!(opt.label(), "Picked!");
        assert_eq!(opt.text(), "second");
        assert!(opt.selected());
    }

    #[test]
    fn test_input_list_and_defaults() {
        let outside = elem(FORM, "#outside");
        let input = outside.as_input().unwrap();
        assert_eq!(input.list().unwrap().id(), "dl");
        assert_eq!(input.type_(), "text");
        let name = elem(FORM, "#name");
        assert_eq!(name.as_input().unwrap().max_length(), 20);
        let btnin = elem(FORM, "#btnin");
        assert_eq!(btnin.as_input().unwrap().max_length(), -1);
        assert!(btnin.as_input().unwrap().list().is_none());
    }

    #[test]
    fn test_textarea_and_fieldset() {
        let ta = elem(FORM, "#ta");
        assert_eq!(ta.as_textarea().unwrap().length(), 3);
        let fs = elem(FORM, "#fs");
        let fieldset = fs.as_fieldset().unwrap();
        assert_eq!(fieldset.elements().len(), 2);
        assert_eq!(fieldset.type_(), "fieldset");
        assert_eq!(fieldset.form().unwrap().id(), "f");
    }

    #[test]
    fn test_progress() {
        let p1 = elem(FORM, "#p1");
        let p = p1.as_progress().unwrap();
        assert_eq!(p.max(), 4.0);
        assert_eq!(p.value(), 0.25);
        assert_eq!(p.position(), 0.25);
        let p2 = elem(FORM, "#p2");
        let p = p2.as_progress().unwrap();
        assert_eq!(p.max(), 1.0);
        assert_eq!(p.value(), 0.0);
        assert_eq!(p.position(), -1.0);
    }

    #[test]
    fn test_label_control_and_output() {
        let doc = parse_html(FORM).unwrap();
        let label = doc.find("label[for]").get(0).unwrap();
        assert_eq!(label.as_label().unwrap().control().unwrap().id(), "name");
        let out = doc.find("#out").get(0).unwrap();
        let output = out.as_output().unwrap();
        assert_eq!(output.value(), "42");
        assert_eq!(output.html_for(), "name");
    }

    #[test]
    fn test_datalist_options() {
        let dl = elem(FORM, "#dl");
        assert_eq!(dl.as_datalist().unwrap().options().len(), 2);
    }
}
