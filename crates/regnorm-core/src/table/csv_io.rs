// crates/regnorm-core/src/table/csv_io.rs
use super::{Cell, Table};
use crate::error::Result;
use crate::loader::common_io;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

impl Table {
    /// Reads a headed CSV stream. Every non-empty field becomes [`Cell::Text`]
    /// (codes such as `01` keep their leading zeros); empty fields become
    /// [`Cell::Missing`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            Cell::Missing
                        } else {
                            Cell::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }
        Table::from_rows(headers, rows)
    }

    /// Writes the table as headed CSV. Missing cells are written as empty fields.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.columns())?;
        for row in self.rows() {
            csv.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// Reads a CSV file (`.csv` or, with the `compact` feature, `.csv.gz`).
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    let reader = common_io::open_stream(path.as_ref())?;
    Table::from_csv_reader(reader)
}

/// Writes `table` to `path` as CSV.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    table.to_csv_writer(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Tabular;

    #[test]
    fn empty_fields_read_as_missing() {
        let data = "region,okato\nМосква,45\n,01\n";
        let table = Table::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, "region"), Some(&Cell::Missing));
        assert_eq!(table.cell(1, "okato"), Some(&Cell::from("01")));
    }

    #[test]
    fn writes_missing_as_empty_field() {
        let table = Table::from_rows(
            ["a", "b"],
            vec![vec![Cell::from("x"), Cell::Missing], vec![Cell::Number(2.0), Cell::from("y, z")]],
        )
        .unwrap();
        let mut out = Vec::new();
        table.to_csv_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\nx,\n2,\"y, z\"\n");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        let table = Table::from_column("region", ["Татарстан", "спб"]);
        write_csv(&table, &path).unwrap();
        assert_eq!(read_csv(&path).unwrap(), table);
    }
}
