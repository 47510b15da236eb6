//! Result Table
//!
//! Display model for a search result plus its HTML rendering. The "Stock
//! Needed" column exists only when a threshold is set.

use crate::domain::ProductRecord;

pub const NO_RESULTS_BELOW_THRESHOLD: &str = "No products found below the specified stock threshold.";
pub const NO_RESULTS: &str = "No products found with the selected criteria.";

/// Table columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Select,
    Image,
    Name,
    Sku,
    Categories,
    Stock,
    Needed,
    Actions,
}

impl Column {
    pub fn title(&self) -> &'static str {
        match self {
            Column::Select => "",
            Column::Image => "Image",
            Column::Name => "Product Name",
            Column::Sku => "SKU",
            Column::Categories => "Categories",
            Column::Stock => "Current Stock",
            Column::Needed => "Stock Needed",
            Column::Actions => "Actions",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockCell {
    NotManaged,
    Quantity { value: i64, below_threshold: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NeededCell {
    NotManaged,
    Dash,
    Needed { value: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    /// Decrease / input / increase controls
    QuantityStepper { value: i64 },
    EnableStock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub product_id: u32,
    pub managing_stock: bool,
    /// `None` renders the "No Image" placeholder
    pub image_url: Option<String>,
    pub name: String,
    pub edit_url: String,
    /// SKU or "-"
    pub sku: String,
    /// Joined category names or "-"
    pub categories: String,
    pub stock: StockCell,
    /// Present only when a threshold is set
    pub needed: Option<NeededCell>,
    pub action: RowAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    /// Set when there are no rows
    pub empty_message: Option<&'static str>,
}

fn dash_if_empty(value: String) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// Build the display model for a result set
pub fn render_table(products: &[ProductRecord], min_stock: Option<u32>) -> ResultsTable {
    if products.is_empty() {
        return ResultsTable {
            columns: Vec::new(),
            rows: Vec::new(),
            empty_message: Some(if min_stock.is_some() {
                NO_RESULTS_BELOW_THRESHOLD
            } else {
                NO_RESULTS
            }),
        };
    }

    let mut columns = vec![
        Column::Select,
        Column::Image,
        Column::Name,
        Column::Sku,
        Column::Categories,
        Column::Stock,
    ];
    if min_stock.is_some() {
        columns.push(Column::Needed);
    }
    columns.push(Column::Actions);

    let rows = products.iter().map(|p| render_row(p, min_stock)).collect();

    ResultsTable {
        columns,
        rows,
        empty_message: None,
    }
}

fn render_row(product: &ProductRecord, min_stock: Option<u32>) -> TableRow {
    let quantity = product.stock_quantity.filter(|_| product.managing_stock);

    let stock = match quantity {
        Some(value) => StockCell::Quantity {
            value,
            below_threshold: product.is_below(min_stock),
        },
        None => StockCell::NotManaged,
    };

    let needed = min_stock.map(|_| match quantity {
        None => NeededCell::NotManaged,
        Some(_) if product.needed_quantity > 0 => NeededCell::Needed {
            value: product.needed_quantity,
        },
        Some(_) => NeededCell::Dash,
    });

    let action = match quantity {
        Some(value) => RowAction::QuantityStepper { value },
        None => RowAction::EnableStock,
    };

    TableRow {
        product_id: product.id,
        managing_stock: quantity.is_some(),
        image_url: product.image_url.clone(),
        name: product.name.clone(),
        edit_url: product.edit_url.clone(),
        sku: dash_if_empty(product.sku.clone()),
        categories: dash_if_empty(product.categories_label()),
        stock,
        needed,
        action,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

impl ResultsTable {
    pub fn to_html(&self) -> String {
        if let Some(message) = self.empty_message {
            return format!("<div class=\"no-results\">{}</div>", escape_html(message));
        }

        let mut html = String::from("<table class=\"inventory-results-table\"><thead><tr>");
        for column in &self.columns {
            match column {
                Column::Select => html.push_str(
                    "<th class=\"bulk-select-column\"><input type=\"checkbox\" id=\"select-all-checkbox\" title=\"Select All\"></th>",
                ),
                other => html.push_str(&format!("<th>{}</th>", other.title())),
            }
        }
        html.push_str("</tr></thead><tbody>");

        for row in &self.rows {
            row.write_html(&mut html);
        }

        html.push_str("</tbody></table>");
        html
    }
}

impl TableRow {
    fn write_html(&self, html: &mut String) {
        let id = self.product_id;
        html.push_str(&format!(
            "<tr data-product-id=\"{}\" data-managing-stock=\"{}\">",
            id,
            if self.managing_stock { 1 } else { 0 }
        ));
        html.push_str(&format!(
            "<td class=\"bulk-select-column\"><input type=\"checkbox\" class=\"product-checkbox\" value=\"{}\"></td>",
            id
        ));

        match &self.image_url {
            Some(url) => html.push_str(&format!(
                "<td><img src=\"{}\" class=\"product-image\" alt=\"{}\"></td>",
                escape_html(url),
                escape_html(&self.name)
            )),
            None => html.push_str("<td><div class=\"product-image product-image-placeholder\">No Image</div></td>"),
        }

        html.push_str(&format!(
            "<td><strong><a href=\"{}\" target=\"_blank\">{}</a></strong></td>",
            escape_html(&self.edit_url),
            escape_html(&self.name)
        ));
        html.push_str(&format!("<td>{}</td>", escape_html(&self.sku)));
        html.push_str(&format!("<td>{}</td>", escape_html(&self.categories)));

        match &self.stock {
            StockCell::NotManaged => {
                html.push_str("<td><span class=\"stock-not-managed\">Not managed</span></td>")
            }
            StockCell::Quantity { value, below_threshold } => html.push_str(&format!(
                "<td><span class=\"{}\">{}</span></td>",
                if *below_threshold { "stock-below-threshold" } else { "" },
                value
            )),
        }

        match &self.needed {
            None => {}
            Some(NeededCell::NotManaged) => html.push_str("<td><span class=\"stock-not-managed\">-</span></td>"),
            Some(NeededCell::Dash) => html.push_str("<td>-</td>"),
            Some(NeededCell::Needed { value }) => {
                html.push_str(&format!("<td><span class=\"stock-needed\">+{}</span></td>", value))
            }
        }

        html.push_str("<td class=\"actions-column\">");
        match &self.action {
            RowAction::EnableStock => html.push_str(&format!(
                "<button class=\"button button-small enable-stock-btn\" data-product-id=\"{}\">Enable Stock</button>",
                id
            )),
            RowAction::QuantityStepper { value } => html.push_str(&format!(
                "<div class=\"quantity-controls\">\
                 <button class=\"button button-small quantity-decrease\" data-product-id=\"{id}\" title=\"Decrease quantity\">-</button>\
                 <input type=\"number\" class=\"quantity-input\" data-product-id=\"{id}\" value=\"{value}\" min=\"0\" />\
                 <button class=\"button button-small quantity-increase\" data-product-id=\"{id}\" title=\"Increase quantity\">+</button>\
                 </div>",
                id = id,
                value = value
            )),
        }
        html.push_str("</td></tr>");
    }
}
