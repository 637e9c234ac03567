use crate::model::Column;
use unicode_width::UnicodeWidthStr;

pub struct TextMetrics {
    pub char_width: f64,
    pub row_height: f64,
    pub header_height: f64,
    pub padding_x: f64,
    pub min_node_width: f64,
    pub min_node_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            row_height: 30.0,
            header_height: 60.0,
            padding_x: 12.0,
            min_node_width: 220.0,
            min_node_height: 150.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Estimated (width, height) of a table card.
    pub fn node_size(&self, label: &str, columns: &[Column]) -> (f64, f64) {
        let header_width = self.text_width(label);

        let max_col_width = columns
            .iter()
            .map(|c| self.text_width(&c.name) + self.text_width(&c.typ) + self.char_width * 2.0)
            .fold(0.0, f64::max);

        let content_width = header_width.max(max_col_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_node_width);

        let height = (columns.len() as f64 * self.row_height + self.header_height).max(self.min_node_height);

        (width, height)
    }
}
