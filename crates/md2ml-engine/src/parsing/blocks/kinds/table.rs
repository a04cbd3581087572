use crate::parsing::blocks::classify::BlockClassifier;
use crate::parsing::blocks::types::BlockKind;
use crate::style::Alignment;

/// Pipe table.
pub struct Table;

impl Table {
    pub const DELIMITER: char = '|';
    pub const ALIGN_MARKER: char = ':';

    /// Splits a row into trimmed cells, dropping the enclosing pipes.
    pub fn cells(row: &str) -> Vec<String> {
        row.trim()
            .trim_matches(Self::DELIMITER)
            .split(Self::DELIMITER)
            .map(|cell| cell.trim().to_string())
            .collect()
    }

    /// Alignment encoded by one separator cell (`:--`, `:-:`, `--:`).
    pub fn alignment(cell: &str) -> Alignment {
        let cell = cell.trim();
        let left = cell.starts_with(Self::ALIGN_MARKER);
        let right = cell.len() > 1 && cell.ends_with(Self::ALIGN_MARKER);
        match (left, right) {
            (true, true) => Alignment::Center,
            (false, true) => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

/// Header, column alignments and data rows of one table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    pub header: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
    /// False when the second row was missing or not a separator. The data
    /// rows are dropped in that case.
    pub well_formed: bool,
}

impl TableShape {
    /// Parses the `\n`-joined rows of a table block.
    pub fn parse(text: &str, classifier: &BlockClassifier<'_>) -> Self {
        let mut lines = text.split('\n');
        let header = Table::cells(lines.next().unwrap_or(""));

        let separator = lines
            .next()
            .filter(|row| classifier.classify_as(row, BlockKind::TableSeparator).is_some());

        let Some(separator) = separator else {
            return Self {
                header,
                alignments: Vec::new(),
                rows: Vec::new(),
                well_formed: false,
            };
        };

        let alignments = Table::cells(separator)
            .iter()
            .map(|cell| Table::alignment(cell))
            .collect();
        let rows = lines.map(Table::cells).collect();

        Self {
            header,
            alignments,
            rows,
            well_formed: true,
        }
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Alignments for a row of `cells` columns, padded with `Left`.
    pub fn alignments_for(&self, cells: usize) -> Vec<Alignment> {
        let mut alignments = self.alignments.clone();
        if alignments.len() < cells {
            alignments.resize(cells, Alignment::Left);
        }
        alignments
    }
}
