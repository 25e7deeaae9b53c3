//! Randomized checks for the fill pass.
//!
//! Documents are generated from a small pool of Vietnamese form lines and
//! filler prose, written to disk, filled, and reopened. The checks hold for
//! any generated document:
//!
//! 1. the reported count equals the number of nodes whose text changed,
//! 2. nodes without a known label never change,
//! 3. filling the output a second time changes nothing.

use docfill::FormFiller;
use docx_rust::document::{
    BodyContent, Paragraph, ParagraphContent, RunContent, Table, TableCell, TableCellContent,
    TableRow, TableRowContent,
};
use docx_rust::{Docx, DocxFile};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Small deterministic PRNG so failures reproduce from the seed.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

fn temp_docx_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time must be after UNIX_EPOCH")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "docfill_invariant_{}_{}_{}.docx",
        prefix,
        std::process::id(),
        nanos
    ))
}

const LABELS: &[(&str, &str)] = &[
    ("Họ và tên", "ho_ten"),
    ("Giới tính", "gioi_tinh"),
    ("Ngày sinh", "ngay_sinh"),
    ("Số CCCD", "so_cccd"),
    ("Số CMND", "so_cmnd"),
    ("Nơi cư trú", "noi_cu_tru"),
    ("Ngày cấp", "ngay_cap_cccd"),
];

const VALUES: &[(&str, &str)] = &[
    ("ho_ten", "Nguyễn Văn An"),
    ("gioi_tinh", "Nam"),
    ("ngay_sinh", "15/08/1992"),
    ("so_cccd", "079092001234"),
    ("so_cmnd", "271234567"),
    ("noi_cu_tru", "35 Trần Hưng Đạo, Quận 1, TP.HCM"),
    ("ngay_cap_cccd", "10/10/2021"),
];

const PROSE: &[&str] = &[
    "CỘNG HÒA XÃ HỘI CHỦ NGHĨA VIỆT NAM",
    "Độc lập - Tự do - Hạnh phúc",
    "Kính gửi: Ủy ban nhân dân phường",
    "Tôi làm đơn này kính đề nghị quý cơ quan xác nhận",
    "Xin trân trọng cảm ơn.",
];

fn random_node_text(rng: &mut Lcg) -> String {
    let (label, _) = LABELS[rng.next_usize(LABELS.len())];
    match rng.next_usize(6) {
        0 => PROSE[rng.next_usize(PROSE.len())].to_string(),
        1 => String::new(),
        2 => format!("{label}: ............"),
        3 => format!("{label}:"),
        4 => format!("{label}: ..... (ghi rõ)"),
        5 => format!("{label}: Thông Tin Cũ"),
        _ => unreachable!(),
    }
}

fn random_data(rng: &mut Lcg) -> HashMap<String, String> {
    let mut data = HashMap::new();
    for &(key, value) in VALUES {
        if rng.next_bool() {
            data.insert(key.to_string(), value.to_string());
        }
    }
    data
}

fn paragraph_text(paragraph: &Paragraph<'_>) -> String {
    let mut text = String::new();
    for content in &paragraph.content {
        if let ParagraphContent::Run(run) = content {
            for item in &run.content {
                if let RunContent::Text(t) = item {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// Extracts node texts in the same order the filler visits them:
/// body paragraphs first, then table cells row by row.
fn node_texts(path: &Path) -> Vec<String> {
    let docx_file = DocxFile::from_file(path).expect("failed to open docx");
    let docx = docx_file.parse().expect("failed to parse docx");
    let mut texts = Vec::new();
    for content in &docx.document.body.content {
        if let BodyContent::Paragraph(paragraph) = content {
            texts.push(paragraph_text(paragraph));
        }
    }
    for content in &docx.document.body.content {
        if let BodyContent::Table(table) = content {
            for row in &table.rows {
                for cell in &row.cells {
                    if let TableRowContent::TableCell(cell) = cell {
                        let mut lines = Vec::new();
                        for item in &cell.content {
                            if let TableCellContent::Paragraph(paragraph) = item {
                                lines.push(paragraph_text(paragraph));
                            }
                        }
                        texts.push(lines.join("\n"));
                    }
                }
            }
        }
    }
    texts
}

fn has_known_label(text: &str) -> bool {
    LABELS.iter().any(|&(label, _)| text.contains(label))
}

#[test]
fn test_randomized_fill_count_and_stability() {
    let mut rng = Lcg::new(0x0DF1_1180_2026_0825);
    let filler = FormFiller::with_defaults();

    for iteration in 0..25 {
        let path = temp_docx_path(&format!("case{iteration}"));
        let mut docx = Docx::default();

        let paragraphs = 2 + rng.next_usize(5);
        for _ in 0..paragraphs {
            docx.document
                .push(Paragraph::default().push_text(random_node_text(&mut rng)));
        }
        if rng.next_bool() {
            let mut table = Table::default();
            let rows = 1 + rng.next_usize(3);
            let cols = 1 + rng.next_usize(2);
            for _ in 0..rows {
                let mut row = TableRow::default();
                for _ in 0..cols {
                    row = row.push_cell(TableCell::paragraph(
                        Paragraph::default().push_text(random_node_text(&mut rng)),
                    ));
                }
                table = table.push_row(row);
            }
            docx.document.push(table);
        }
        docx.write_file(&path).expect("failed to write test docx");

        let data = random_data(&mut rng);
        let before = node_texts(&path);
        let (first_output, first_count) = filler.fill(&path, &data).expect("first fill failed");
        let after = node_texts(&first_output);

        assert_eq!(
            before.len(),
            after.len(),
            "iteration {iteration}: node count drifted"
        );
        let changed = before
            .iter()
            .zip(after.iter())
            .filter(|(b, a)| b != a)
            .count();
        assert_eq!(
            first_count, changed,
            "iteration {iteration}: reported count does not match observed changes"
        );
        for (b, a) in before.iter().zip(after.iter()) {
            if !has_known_label(b) {
                assert_eq!(b, a, "iteration {iteration}: unlabeled node was rewritten");
            }
        }

        let (second_output, second_count) = filler
            .fill(&first_output, &data)
            .expect("second fill failed");
        assert_eq!(
            second_count, 0,
            "iteration {iteration}: second pass still changed nodes"
        );
        assert_eq!(
            after,
            node_texts(&second_output),
            "iteration {iteration}: second pass altered text"
        );

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&first_output);
        let _ = std::fs::remove_file(&second_output);
    }
}
