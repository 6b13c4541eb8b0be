//! Table Enhancements
//!
//! Search box and sortable headers for server-rendered `.table` elements.
//! Ordering and filtering are pure functions over cell text; the DOM side
//! only reads text and reorders/hides rows.

use std::cmp::Ordering;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCollection, HtmlInputElement, HtmlTableElement, HtmlTableRowElement, HtmlTableSectionElement, Node};

use crate::context::UiContext;
use crate::dom::{closest_or_parent, listen, select_all_in, set_style};
use crate::error::UiResult;
use crate::locale::Locale;
use crate::numeric::parse_amount;

/// Per-table sort state attribute
pub const SORT_ATTR: &str = "data-sort-direction";
/// Set once a table has been enhanced
pub const ENHANCED_ATTR: &str = "data-enhanced";
pub const SEARCH_PLACEHOLDER: &str = "Search table...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Read the stored attribute. Any value other than `desc` counts as ascending.
    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        value.map(|v| {
            if v == "desc" {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            }
        })
    }

    pub fn as_attr(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn header_class(self) -> &'static str {
        match self {
            SortDirection::Ascending => "sort-asc",
            SortDirection::Descending => "sort-desc",
        }
    }

    /// Direction for the next click. No previous sort counts as
    /// descending, so the first click sorts ascending.
    pub fn next(previous: Option<Self>) -> Self {
        match previous {
            Some(SortDirection::Ascending) => SortDirection::Descending,
            None | Some(SortDirection::Descending) => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

fn sort_key(cell: &str) -> SortKey {
    match parse_amount(cell) {
        Some(n) => SortKey::Number(n),
        None => SortKey::Text(cell.to_string()),
    }
}

// Numbers sort before text so mixed columns still have a total order.
fn compare_keys(a: &SortKey, b: &SortKey, locale: &dyn Locale) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Text(x), SortKey::Text(y)) => locale.compare_text(x, y),
    }
}

/// Compare two cells: numerically when both parse (after dropping `$`/`,`),
/// otherwise as locale text.
///
/// Any number orders before any text, so blank or placeholder cells (`""`,
/// `-`) in a numeric column land after the amounts when ascending.
pub fn compare_cells(a: &str, b: &str, locale: &dyn Locale) -> Ordering {
    compare_keys(&sort_key(a), &sort_key(b), locale)
}

/// Stable sort permutation of `cells` for `direction`
pub fn sorted_order(cells: &[String], direction: SortDirection, locale: &dyn Locale) -> Vec<usize> {
    let keys: Vec<SortKey> = cells.iter().map(|cell| sort_key(cell)).collect();
    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = compare_keys(&keys[a], &keys[b], locale);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    order
}

/// Indicator class per header: only the sorted column gets one
pub fn header_classes(
    header_count: usize,
    column: usize,
    direction: SortDirection,
) -> Vec<Option<&'static str>> {
    (0..header_count)
        .map(|index| (index == column).then(|| direction.header_class()))
        .collect()
}

/// Case-insensitive substring match over a row's full text
pub fn row_matches(row_text: &str, term: &str) -> bool {
    row_text.to_lowercase().contains(&term.to_lowercase())
}

// ========================
// DOM
// ========================

fn collection_elements(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

fn row_count(table: &Element) -> u32 {
    table
        .dyn_ref::<HtmlTableElement>()
        .map(|t| t.rows().length())
        .unwrap_or(0)
}

fn cell_text(row: &Element, column: usize) -> String {
    row.dyn_ref::<HtmlTableRowElement>()
        .and_then(|row| row.cells().item(column as u32))
        .and_then(|cell| cell.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Show or hide every body row by `term`
pub fn filter_rows(table: &Element, term: &str) -> UiResult<()> {
    for row in select_all_in(table, "tbody tr")? {
        let text = row.text_content().unwrap_or_default();
        let display = if row_matches(&text, term) { "" } else { "none" };
        set_style(&row, "display", display)?;
    }
    Ok(())
}

/// Sort body rows by `column`, flipping the table's direction
pub fn sort_table(table: &Element, column: usize, locale: &dyn Locale) -> UiResult<SortDirection> {
    let previous = SortDirection::from_attr(table.get_attribute(SORT_ATTR).as_deref());
    let direction = SortDirection::next(previous);

    if let Some(tbody) = table.query_selector("tbody")? {
        let rows = match tbody.dyn_ref::<HtmlTableSectionElement>() {
            Some(section) => collection_elements(&section.rows()),
            None => select_all_in(&tbody, "tr")?,
        };
        let cells: Vec<String> = rows.iter().map(|row| cell_text(row, column)).collect();
        for index in sorted_order(&cells, direction, locale) {
            tbody.append_child(&rows[index])?;
        }
    }

    table.set_attribute(SORT_ATTR, direction.as_attr())?;
    let headers = select_all_in(table, "thead th")?;
    let classes = header_classes(headers.len(), column, direction);
    for (header, class) in headers.iter().zip(classes) {
        header.class_list().remove_2("sort-asc", "sort-desc")?;
        if let Some(class) = class {
            header.class_list().add_1(class)?;
        }
    }
    Ok(direction)
}

/// Child of `ancestor` on the path down to `el`
fn child_on_path(ancestor: &Element, el: &Element) -> Option<Node> {
    let ancestor: &Node = ancestor;
    let mut current: Node = el.clone().into();
    loop {
        let parent = current.parent_node()?;
        if &parent == ancestor {
            return Some(current);
        }
        current = parent;
    }
}

fn add_search(ctx: &UiContext, table: &Element) -> UiResult<Option<HtmlInputElement>> {
    let Some(wrapper) = closest_or_parent(table, ".table-responsive") else {
        return Ok(None);
    };
    let doc = &ctx.document;

    let container = doc.create_element("div")?;
    container.set_class_name("table-search mb-3");
    let icon = doc.create_element("i")?;
    icon.set_class_name("fas fa-search");
    let input: HtmlInputElement = doc.create_element("input")?.unchecked_into();
    input.set_type("text");
    input.set_class_name("form-control");
    input.set_placeholder(SEARCH_PLACEHOLDER);

    container.append_child(&icon)?;
    container.append_child(&input)?;
    let anchor = child_on_path(&wrapper, table);
    wrapper.insert_before(&container, anchor.as_ref())?;

    let (target, source) = (table.clone(), input.clone());
    listen(&input, "input", move |_: web_sys::Event| {
        if let Err(e) = filter_rows(&target, &source.value()) {
            log::warn!("[TABLE] Filter failed: {}", e);
        }
    })?;
    Ok(Some(input))
}

fn add_sorting(ctx: &UiContext, table: &Element) -> UiResult<()> {
    let headers = select_all_in(table, "thead th")?;
    for (index, header) in headers.iter().enumerate() {
        let label = header.text_content().unwrap_or_default().to_lowercase();
        if label.contains("action") {
            continue;
        }
        set_style(header, "cursor", "pointer")?;
        header.set_attribute("title", "Click to sort")?;

        let (target, locale) = (table.clone(), ctx.locale.clone());
        listen(header, "click", move |_: web_sys::MouseEvent| {
            match sort_table(&target, index, locale.as_ref()) {
                Ok(direction) => log::debug!("[TABLE] Sorted column {} {}", index, direction.as_attr()),
                Err(e) => log::warn!("[TABLE] Sort failed: {}", e),
            }
        })?;
    }
    Ok(())
}

/// Enhance one table. Returns its search input, if one was added.
pub fn enhance(ctx: &UiContext, table: &Element) -> UiResult<Option<HtmlInputElement>> {
    if table.has_attribute(ENHANCED_ATTR) {
        return Ok(None);
    }
    table.set_attribute(ENHANCED_ATTR, "")?;
    table.class_list().add_1("table-hover")?;

    let search = if row_count(table) > ctx.config.search_row_threshold {
        add_search(ctx, table)?
    } else {
        None
    };
    add_sorting(ctx, table)?;
    Ok(search)
}

/// Enhance all tables; returns the search inputs in document order
pub fn init(ctx: &UiContext, tables: &[Element]) -> Vec<HtmlInputElement> {
    let mut inputs = Vec::new();
    for table in tables {
        match enhance(ctx, table) {
            Ok(Some(input)) => inputs.push(input),
            Ok(None) => {}
            Err(e) => log::warn!("[TABLE] Failed to enhance table: {}", e),
        }
    }
    log::debug!("[TABLE] Enhanced {} tables, {} searchable", tables.len(), inputs.len());
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FixedLocale;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn apply(values: &[&str], direction: SortDirection) -> Vec<String> {
        let cells = cells(values);
        sorted_order(&cells, direction, &FixedLocale)
            .into_iter()
            .map(|i| cells[i].clone())
            .collect()
    }

    #[test]
    fn test_direction_toggles_from_absent() {
        let first = SortDirection::next(None);
        let second = SortDirection::next(Some(first));
        let third = SortDirection::next(Some(second));

        assert_eq!(first, SortDirection::Ascending);
        assert_eq!(second, SortDirection::Descending);
        assert_eq!(third, SortDirection::Ascending);
    }

    #[test]
    fn test_direction_attr_parsing() {
        assert_eq!(SortDirection::from_attr(None), None);
        assert_eq!(
            SortDirection::from_attr(Some("desc")),
            Some(SortDirection::Descending)
        );
        assert_eq!(
            SortDirection::from_attr(Some("asc")),
            Some(SortDirection::Ascending)
        );
        assert_eq!(
            SortDirection::from_attr(Some("bogus")),
            Some(SortDirection::Ascending)
        );
    }

    #[test]
    fn test_currency_sorts_numerically() {
        assert_eq!(
            apply(&["$1,200", "$300", "$45.50"], SortDirection::Ascending),
            vec!["$45.50", "$300", "$1,200"]
        );
        assert_eq!(
            apply(&["$1,200", "$300", "$45.50"], SortDirection::Descending),
            vec!["$1,200", "$300", "$45.50"]
        );
    }

    #[test]
    fn test_text_sorts_case_insensitively() {
        assert_eq!(
            apply(&["rent", "Bank", "Payroll", "bank"], SortDirection::Ascending),
            vec!["bank", "Bank", "Payroll", "rent"]
        );
    }

    #[test]
    fn test_accented_text_sorts_with_base_letter() {
        assert_eq!(
            apply(&["Zoo", "École", "Bureau"], SortDirection::Ascending),
            vec!["Bureau", "École", "Zoo"]
        );
    }

    #[test]
    fn test_blank_cells_follow_amounts() {
        let cells = cells(&["$5", "", "$3"]);
        assert_eq!(sorted_order(&cells, SortDirection::Ascending, &FixedLocale), vec![2, 0, 1]);
    }

    #[test]
    fn test_numbers_before_text_in_mixed_column() {
        assert_eq!(
            apply(&["N/A", "$10", "pending", "$2"], SortDirection::Ascending),
            vec!["$2", "$10", "N/A", "pending"]
        );
    }

    #[test]
    fn test_equal_keys_keep_order_both_directions() {
        let cells = cells(&["5", "5.0", "$5", "1"]);
        assert_eq!(sorted_order(&cells, SortDirection::Ascending, &FixedLocale), vec![3, 0, 1, 2]);
        assert_eq!(sorted_order(&cells, SortDirection::Descending, &FixedLocale), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_compare_cells() {
        assert_eq!(compare_cells("$300", "$1,200", &FixedLocale), Ordering::Less);
        assert_eq!(compare_cells("Zeta", "alpha", &FixedLocale), Ordering::Greater);
        assert_eq!(compare_cells("", "", &FixedLocale), Ordering::Equal);
    }

    #[test]
    fn test_sort_marker_only_on_sorted_header() {
        assert_eq!(
            header_classes(4, 2, SortDirection::Descending),
            vec![None, None, Some("sort-desc"), None]
        );
        // Re-sorting another column moves the marker
        assert_eq!(
            header_classes(4, 0, SortDirection::Ascending),
            vec![Some("sort-asc"), None, None, None]
        );
        assert_eq!(header_classes(2, 5, SortDirection::Ascending), vec![None, None]);
    }

    #[test]
    fn test_search_filters_bank_rows() {
        let rows = [
            "2024-01-02 First National BANK $1,200",
            "2024-01-03 Office rent $300",
            "2024-01-04 bank fee $5",
            "2024-01-05 Payroll $4,000",
        ];
        let visible: Vec<bool> = rows.iter().map(|r| row_matches(r, "bank")).collect();
        assert_eq!(visible, vec![true, false, true, false]);
    }

    #[test]
    fn test_empty_search_shows_everything() {
        assert!(row_matches("anything", ""));
        assert!(row_matches("", ""));
    }
}
