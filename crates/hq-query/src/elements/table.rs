//! Tables

use super::ElementView;
use crate::Element;

/// `td` and `th`
pub trait TableCell: ElementView {
    /// Position among the cells of the enclosing row
    fn cell_index(&self) -> Option<usize> {
        let elem = self.element();
        let row = elem.ancestor("tr")?;
        elem.position_in(&row.selection().find("th,td"))
    }

    fn col_span(&self) -> i64 {
        self.element().attr_as_int("colspan", 1)
    }

    fn row_span(&self) -> i64 {
        self.element().attr_as_int("rowspan", 1)
    }

    fn headers(&self) -> String {
        self.element().attr_as_string("headers")
    }
}

/// `thead`, `tbody` and `tfoot`
pub trait TableSection: ElementView {
    fn rows(&self) -> Vec<Element> {
        self.element().find_all("tr")
    }
}

element_views! {
    /// `<table>`
    TableElement => as_table ["table"];
    /// `<thead>`, `<tbody>` or `<tfoot>`
    TableSectionElement => as_table_section ["thead", "tbody", "tfoot"];
    /// `<tr>`
    TableRowElement => as_table_row ["tr"];
    /// `<td>` or `<th>`
    TableCellElement => as_table_cell ["td", "th"];
    /// `<col>`
    TableColElement => as_table_col ["col"];
}

impl TableCell for TableCellElement<'_> {}
impl TableSection for TableSectionElement<'_> {}

impl TableElement<'_> {
    fn first_child_matching(&self, selector: &str) -> Option<Element> {
        self.selection().children_filtered(selector).get(0)
    }

    pub fn caption(&self) -> Option<Element> {
        self.first_child_matching("caption")
    }

    pub fn thead(&self) -> Option<Element> {
        self.first_child_matching("thead")
    }

    pub fn tfoot(&self) -> Option<Element> {
        self.first_child_matching("tfoot")
    }

    /// Every row, nested sections included
    pub fn rows(&self) -> Vec<Element> {
        self.find_all("tr")
    }

    pub fn tbodies(&self) -> Vec<Element> {
        self.find_all("tbody")
    }

    pub fn sortable(&self) -> bool {
        self.attr_is_present("sortable")
    }
}

impl TableRowElement<'_> {
    pub fn cells(&self) -> Vec<Element> {
        self.find_all("th,td")
    }

    /// Position among all rows of the enclosing table
    pub fn row_index(&self) -> Option<usize> {
        let table = self.ancestor("table")?;
        self.position_in(&table.selection().find("tr"))
    }

    /// Position among the rows of the enclosing section
    pub fn section_row_index(&self) -> Option<usize> {
        let section = self.ancestor("thead,tbody,tfoot")?;
        self.position_in(&section.selection().find("tr"))
    }
}

impl TableCellElement<'_> {
    pub fn abbr(&self) -> String {
        self.attr_as_string("abbr")
    }

    pub fn scope(&self) -> &'static str {
        self.attr_as_enum("scope", &["", "row", "col", "colgroup", "rowgroup"])
    }
}

impl TableColElement<'_> {
    /// `span`, never below 1
    pub fn span(&self) -> i64 {
        self.attr_as_int("span", 1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_html;

    const TABLE: &str = r#"
        <table id="t" sortable>
            <caption>Caption</caption>
            <colgroup><col id="c1" span="3"><col id="c2" span="0"></colgroup>
            <thead><tr id="h"><th id="th1" scope="col">A</th><th>B</th></tr></thead>
            <tbody>
                <tr id="r1"><td>1</td><td id="cell" colspan="2" headers="th1">2</td></tr>
                <tr id="r2"><td abbr="three">3</td></tr>
            </tbody>
            <tfoot><tr id="f"><td rowspan="x">F</td></tr></tfoot>
        </table>
    "#;

    fn elem(selector: &str) -> Element {
        parse_html(TABLE).unwrap().find(selector).get(0).unwrap()
    }

    #[test]
    fn test_table_parts() {
        let t = elem("#t");
        let table = t.as_table().unwrap();
        assert_eq!(table.caption().unwrap().text_content(), "Caption");
        assert_eq!(table.thead().unwrap().tag_name(), "thead");
        assert_eq!(table.tfoot().unwrap().tag_name(), "tfoot");
        assert_eq!(table.tbodies().len(), 1);
        assert_eq!(table.rows().len(), 4);
        assert!(table.sortable());
    }

    #[test]
    fn test_row_indices() {
        let r2 = elem("#r2");
        let row = r2.as_table_row().unwrap();
        assert_eq!(row.row_index(), Some(2));
        assert_eq!(row.section_row_index(), Some(1));
        let r1 = elem("#r1");
        assert_eq!(r1.as_table_row().unwrap().cells().len(), 2);
    }

    #[test]
    fn test_cells() {
        let c = elem("#cell");
        let cell = c.as_table_cell().unwrap();
        assert_eq!(cell.cell_index(), Some(1));
        assert_eq!(cell.col_span(), 2);
        assert_eq!(cell.row_span(), 1);
        assert_eq!(cell.headers(), "th1");
        assert_eq!(cell.scope(), "");

        let th = elem("#th1");
        assert_eq!(th.as_table_cell().unwrap().scope(), "col");
        let foot = elem("#f td");
        assert_eq!(foot.as_table_cell().unwrap().row_span(), 1);
    }

    #[test]
    fn test_sections_and_cols() {
        let doc = parse_html(TABLE).unwrap();
        let body = doc.find("tbody").get(0).unwrap();
        assert_eq!(body.as_table_section().unwrap().rows().len(), 2);
        let c1 = doc.find("#c1").get(0).unwrap();
        assert_eq!(c1.as_table_col().unwrap().span(), 3);
        let c2 = doc.find("#c2").get(0).unwrap();
        assert_eq!(c2.as_table_col().unwrap().span(), 1);
    }
}
