use outliner_core::cancel::CancelToken;
use outliner_core::classify::{classify_all, ClassifiedLine};
use outliner_core::consolidate::build_outline;
use outliner_core::{
    DocumentOutline, HeuristicConfig, Level, Line, OcrSource, OutlineEngine, OutlineEntry,
    OutlineResult, RawLine, Thresholds,
};
use std::path::Path;

struct StaticOcr(Vec<String>);

impl OcrSource for StaticOcr {
    fn is_available(&self) -> bool {
        true
    }

    fn recognize_pages(&self, _path: &Path, _cancel: &CancelToken) -> OutlineResult<Vec<String>> {
        Ok(self.0.clone())
    }
}

fn entry(level: Level, text: &str, page: usize) -> OutlineEntry {
    OutlineEntry {
        level,
        text: text.to_string(),
        page,
    }
}

fn report_lines() -> Vec<RawLine> {
    vec![
        RawLine::new("Executive Summary", 20.0, true, 1, 750.0),
        RawLine::new("This report covers...", 11.0, false, 1, 700.0),
        RawLine::new("1. Background", 16.0, true, 2, 780.0),
    ]
}

#[test]
fn test_empty_document() {
    let engine = OutlineEngine::default();
    assert!(engine.extract_outline(&[]).is_empty());
    assert_eq!(engine.extract_title(&[], "blank.pdf"), "blank.pdf");

    let doc = engine
        .process_lines(Path::new("/in/blank.pdf"), &[], &CancelToken::new())
        .expect("empty documents are not errors");
    assert_eq!(
        doc,
        DocumentOutline {
            title: "blank.pdf".to_string(),
            outline: Vec::new(),
        }
    );
}

#[test]
fn test_end_to_end_report() {
    let engine = OutlineEngine::default();
    let doc = engine
        .process_lines(Path::new("report.pdf"), &report_lines(), &CancelToken::new())
        .expect("process");

    assert_eq!(doc.title, "Executive Summary");
    assert_eq!(
        doc.outline,
        vec![
            entry(Level::H1, "Executive Summary", 1),
            entry(Level::H2, "1. Background", 2),
        ]
    );
}

#[test]
fn test_ocr_fallback_scenario() {
    let engine = OutlineEngine::default().with_ocr(StaticOcr(vec![
        "SUMMARY\nThis is body text.\nCONCLUSION".to_string(),
    ]));
    // Only body-sized text: nothing survives the primary path.
    let raw = vec![
        RawLine::new("scanned page footer text", 9.0, false, 1, 40.0),
        RawLine::new("another stray body line", 9.0, false, 1, 30.0),
    ];

    let doc = engine
        .process_lines(Path::new("scan.pdf"), &raw, &CancelToken::new())
        .expect("process");
    assert_eq!(
        doc.outline,
        vec![entry(Level::H2, "SUMMARY", 1), entry(Level::H2, "CONCLUSION", 1)]
    );
}

#[test]
fn test_ocr_not_consulted_when_primary_finds_headings() {
    let engine = OutlineEngine::default().with_ocr(StaticOcr(vec!["SHOULD NOT APPEAR".to_string()]));
    let doc = engine
        .process_lines(Path::new("report.pdf"), &report_lines(), &CancelToken::new())
        .expect("process");
    assert!(doc.outline.iter().all(|e| e.text != "SHOULD NOT APPEAR"));
}

#[test]
fn test_wrapped_heading_is_merged() {
    let config = HeuristicConfig::default();
    let make = |text: &str, size: f32, y: f32| ClassifiedLine {
        line: Line::from_raw(&RawLine::new(text, size, true, 3, y), 3).expect("line"),
        level: Level::H2,
    };

    let outline = build_outline(
        vec![make("Risk Assessment and", 14.0, 600.0), make("Mitigation Plan", 14.3, 560.0)],
        &config,
    );
    assert_eq!(outline, vec![entry(Level::H2, "Risk Assessment and Mitigation Plan", 3)]);
}

#[test]
fn test_cluster_ids_do_not_affect_outline() {
    let engine = OutlineEngine::default();
    let raw = vec![
        RawLine::new("Annual Review", 22.0, true, 1, 760.0),
        RawLine::new("OPERATIONS", 16.0, false, 1, 620.0),
        RawLine::new("Staffing levels stayed flat this year", 11.0, false, 1, 600.0),
        RawLine::new("Finance Overview", 13.0, true, 2, 700.0).centered(),
        RawLine::new("Revenue grew in every region", 11.0, false, 2, 680.0),
    ];

    let clustered = engine.prepare(&raw);
    let unclustered: Vec<Line> = clustered
        .iter()
        .cloned()
        .map(|mut line| {
            line.cluster_id = None;
            line
        })
        .collect();

    let with_clusters = engine.extract_outline(&clustered);
    assert!(!with_clusters.is_empty());
    assert_eq!(with_clusters, engine.extract_outline(&unclustered));
}

#[test]
fn test_classification_table() {
    let config = HeuristicConfig::default();
    let thresholds = Thresholds::new(18.0, 14.0, 11.0);
    let lines = vec![
        Line::from_raw(&RawLine::new("Annual Report", 18.0, true, 1, 500.0), 3).unwrap(),
        Line::from_raw(&RawLine::new("Market Overview", 14.0, false, 1, 450.0).centered(), 3)
            .unwrap(),
        Line::from_raw(&RawLine::new("APPENDIX", 11.0, false, 1, 400.0), 3).unwrap(),
        Line::from_raw(&RawLine::new("plain body words", 11.0, false, 1, 350.0), 3).unwrap(),
    ];

    let levels: Vec<(String, Level)> = classify_all(lines, &thresholds, &config)
        .into_iter()
        .map(|c| (c.line.text, c.level))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("Annual Report".to_string(), Level::H1),
            ("Market Overview".to_string(), Level::H2),
            ("APPENDIX".to_string(), Level::H3),
        ]
    );
}

#[test]
fn test_outline_serializes_as_record() {
    let doc = DocumentOutline {
        title: "Executive Summary".to_string(),
        outline: vec![entry(Level::H1, "Executive Summary", 1)],
    };
    let json = serde_json::to_value(&doc).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Executive Summary",
            "outline": [{ "level": "H1", "text": "Executive Summary", "page": 1 }]
        })
    );
}
