use crate::domain::model::{BerryRecord, MutationRecord};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};

pub const BERRY_HEADERS: [&str; 3] = ["Berry Name", "Preferred Biomes", "Favorite Mulches"];
pub const MUTATION_HEADERS: [&str; 3] = ["Mutation Berry Name", "Berry Name", "Other Berry Name"];

const LIST_SEPARATOR: &str = ", ";

/// 可以輸出成表格一列的紀錄
pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

impl TableRow for BerryRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.preferred_biomes.join(LIST_SEPARATOR),
            self.favorite_mulches.join(LIST_SEPARATOR),
        ]
    }
}

impl TableRow for MutationRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.source_berry.clone(),
            self.other_berry.clone(),
            self.result_berry.clone(),
        ]
    }
}

/// 以 RFC 4180 規則（CRLF 換行）輸出表頭與資料列；列長度與表頭不符時回傳錯誤
pub fn render_csv<T: TableRow>(headers: &[&str], rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// 寫出整張表（覆寫既有檔案），回傳寫入的資料列數
pub async fn write_table<S: Storage, T: TableRow + Sync>(
    storage: &S,
    path: &str,
    headers: &[&str],
    rows: &[T],
) -> Result<usize> {
    let data = render_csv(headers, rows)?;
    tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), path);
    storage.write_file(path, &data).await?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berry(name: &str, biomes: &[&str], mulches: &[&str]) -> BerryRecord {
        BerryRecord {
            name: name.to_string(),
            preferred_biomes: biomes.iter().map(|s| s.to_string()).collect(),
            favorite_mulches: mulches.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_berry_table() {
        let rows = vec![
            berry("Cheri Berry", &["Forest"], &["Growth Mulch"]),
            berry("Oran Berry", &[], &[]),
        ];

        let csv = String::from_utf8(render_csv(&BERRY_HEADERS, &rows).unwrap()).unwrap();

        assert_eq!(
            csv,
            "Berry Name,Preferred Biomes,Favorite Mulches\r\n\
             Cheri Berry,Forest,Growth Mulch\r\n\
             Oran Berry,,\r\n"
        );
    }

    #[test]
    fn test_joined_cells_are_quoted() {
        let rows = vec![berry(
            "Pecha Berry",
            &["Swamp", "Beach"],
            &["Surprise Mulch", "Coarse Mulch"],
        )];

        let csv = String::from_utf8(render_csv(&BERRY_HEADERS, &rows).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[1],
            r#"Pecha Berry,"Swamp, Beach","Surprise Mulch, Coarse Mulch""#
        );
    }

    #[test]
    fn test_quote_characters_are_escaped() {
        let rows = vec![MutationRecord {
            source_berry: "Odd \"Quoted\" Berry".to_string(),
            other_berry: "Line\nBreak".to_string(),
            result_berry: "Plain".to_string(),
        }];

        let csv = String::from_utf8(render_csv(&MUTATION_HEADERS, &rows).unwrap()).unwrap();

        assert!(csv.contains(r#""Odd ""Quoted"" Berry""#));
        assert!(csv.contains("\"Line\nBreak\""));
    }

    #[test]
    fn test_row_arity_must_match_headers() {
        let rows = vec![berry("Cheri Berry", &["Forest"], &[])];
        let result = render_csv(&["Berry Name", "Preferred Biomes"], &rows);
        assert!(result.is_err());
    }
}
