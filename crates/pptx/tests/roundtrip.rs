//! End-to-end tests over minimal generated .pptx packages: parse, search,
//! and extraction of matching slides.

use slidegrep_core::PhraseSet;
use slidegrep_pptx::{extract_results, extract_slides, search_folder, search_presentation, PptxParser};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CT_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Write a minimal but structurally complete .pptx with one text shape per
/// slide, one slide per entry of `slide_texts`.
fn write_fixture(path: &Path, slide_texts: &[&str]) {
    write_deck(path, slide_texts, false);
}

/// Like `write_fixture`, but attaches a notes slide to every slide, wired
/// through the slide's own relationships part.
fn write_fixture_with_notes(path: &Path, slide_texts: &[&str]) {
    write_deck(path, slide_texts, true);
}

fn write_deck(path: &Path, slide_texts: &[&str], with_notes: bool) {
    let file = File::create(path).expect("create fixture");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();

    let mut content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{}"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
        CT_NS
    );
    for i in 1..=slide_texts.len() {
        content_types.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            i
        ));
        if with_notes {
            content_types.push_str(&format!(
                r#"<Override PartName="/ppt/notesSlides/notesSlide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml"/>"#,
                i
            ));
        }
    }
    content_types.push_str("</Types>");

    let root_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#,
        REL_NS
    );

    let sld_ids: String = (1..=slide_texts.len())
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i))
        .collect();
    let presentation = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="{}" xmlns:r="{}"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
        P_NS, R_NS, sld_ids
    );

    let rel_entries: String = (1..=slide_texts.len())
        .map(|i| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i, i
            )
        })
        .collect();
    let presentation_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">{}</Relationships>"#,
        REL_NS, rel_entries
    );

    let mut write_part = |name: &str, content: &str| {
        zip.start_file(name, options).expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    };

    write_part("[Content_Types].xml", &content_types);
    write_part("_rels/.rels", &root_rels);
    write_part("ppt/presentation.xml", &presentation);
    write_part("ppt/_rels/presentation.xml.rels", &presentation_rels);

    for (i, text) in slide_texts.iter().enumerate() {
        let slide = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="{}" xmlns:a="{}"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            P_NS, A_NS, text
        );
        write_part(&format!("ppt/slides/slide{}.xml", i + 1), &slide);
    }

    if with_notes {
        for i in 1..=slide_texts.len() {
            let slide_rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide{}.xml"/></Relationships>"#,
                REL_NS, i
            );
            write_part(&format!("ppt/slides/_rels/slide{}.xml.rels", i), &slide_rels);

            let notes = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:p="{}" xmlns:a="{}"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>Notes for slide {}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:notes>"#,
                P_NS, A_NS, i
            );
            write_part(&format!("ppt/notesSlides/notesSlide{}.xml", i), &notes);

            let notes_rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="../slides/slide{}.xml"/></Relationships>"#,
                REL_NS, i
            );
            write_part(
                &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", i),
                &notes_rels,
            );
        }
    }

    zip.finish().expect("finish fixture");
}

fn parse_file(path: &Path) -> Vec<slidegrep_core::SlideContent> {
    let file = File::open(path).expect("open fixture");
    PptxParser::new().parse(file).expect("parse fixture")
}

#[test]
fn parse_returns_slides_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let deck = dir.path().join("deck.pptx");
    write_fixture(&deck, &["First slide", "Second slide", "Third slide"]);

    let slides = parse_file(&deck);
    assert_eq!(slides.len(), 3);
    assert_eq!(slides[0].number, 1);
    assert_eq!(slides[0].text, "First slide");
    assert_eq!(slides[2].number, 3);
    assert_eq!(slides[2].text, "Third slide");
}

#[test]
fn search_presentation_finds_case_insensitive_matches() {
    let dir = tempfile::tempdir().unwrap();
    let deck = dir.path().join("deck.pptx");
    write_fixture(&deck, &["Q3 Budget Review", "Team Timeline", "Closing"]);

    let phrases = PhraseSet::new(["budget", "TIMELINE"]);
    let matches = search_presentation(&deck, &phrases).unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].number, 1);
    assert_eq!(matches[0].index, 0);
    assert_eq!(matches[1].number, 2);
    assert!(matches[1].text.contains("Timeline"));
}

#[test]
fn search_folder_reports_only_matching_files_and_slides() {
    // Folder: a.pptx (slide 1 "Budget", slide 2 "Timeline"), b.pptx (no
    // match); phrases ["budget", "", ""] — only 001_a.pptx slide 1 matches.
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("a.pptx"), &["Annual Budget", "Project Timeline"]);
    write_fixture(&dir.path().join("b.pptx"), &["Welcome", "Agenda"]);

    let phrases = PhraseSet::new(["budget", "", ""]);
    let results = search_folder(dir.path(), &phrases).unwrap();

    assert_eq!(results.file_count(), 1);
    let file = &results.files[0];
    assert_eq!(file.file_id, "001_a.pptx");
    assert_eq!(file.slides.len(), 1);
    assert_eq!(file.slides[0].number, 1);
    assert!(file.slides[0].text.contains("Budget"));
}

#[test]
fn search_folder_ignores_other_extensions() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("b.pptx"), &["Budget"]);
    std::fs::write(dir.path().join("a.txt"), "budget budget budget").unwrap();

    let phrases = PhraseSet::new(["budget"]);
    let results = search_folder(dir.path(), &phrases).unwrap();

    // IDs count only .pptx files, so b.pptx is 001 despite a.txt sorting first.
    assert_eq!(results.file_count(), 1);
    assert_eq!(results.files[0].file_id, "001_b.pptx");
}

#[test]
fn search_folder_with_empty_phrases_matches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("a.pptx"), &["Budget"]);

    let results = search_folder(dir.path(), &PhraseSet::new(["", "  "])).unwrap();
    assert!(results.is_empty());
}

#[test]
fn extract_keeps_only_requested_slides() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("deck.pptx");
    let target = dir.path().join("out.pptx");
    write_fixture(&source, &["Alpha", "Beta", "Gamma", "Delta"]);

    let kept = extract_slides(&source, &target, &[0, 2]).unwrap();
    assert_eq!(kept, 2);

    // The extracted package must be a consistent presentation again.
    let slides = parse_file(&target);
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].text, "Alpha");
    assert_eq!(slides[1].text, "Gamma");
}

#[test]
fn extract_drops_notes_of_removed_slides() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("deck.pptx");
    let target = dir.path().join("out.pptx");
    write_fixture_with_notes(&source, &["Alpha", "Beta"]);

    let kept = extract_slides(&source, &target, &[0]).unwrap();
    assert_eq!(kept, 1);

    let file = File::open(&target).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();

    // The dropped slide takes its relationships part and its notes slide
    // (plus that part's own relationships) with it.
    assert!(!names.contains(&"ppt/slides/slide2.xml".to_string()));
    assert!(!names.contains(&"ppt/slides/_rels/slide2.xml.rels".to_string()));
    assert!(!names.contains(&"ppt/notesSlides/notesSlide2.xml".to_string()));
    assert!(!names.contains(&"ppt/notesSlides/_rels/notesSlide2.xml.rels".to_string()));

    // The kept slide's notes wiring survives intact.
    assert!(names.contains(&"ppt/slides/slide1.xml".to_string()));
    assert!(names.contains(&"ppt/slides/_rels/slide1.xml.rels".to_string()));
    assert!(names.contains(&"ppt/notesSlides/notesSlide1.xml".to_string()));
    assert!(names.contains(&"ppt/notesSlides/_rels/notesSlide1.xml.rels".to_string()));

    let mut content_types = String::new();
    archive
        .by_name("[Content_Types].xml")
        .unwrap()
        .read_to_string(&mut content_types)
        .unwrap();
    assert!(!content_types.contains("/ppt/slides/slide2.xml"));
    assert!(!content_types.contains("/ppt/notesSlides/notesSlide2.xml"));
    assert!(content_types.contains("/ppt/slides/slide1.xml"));
    assert!(content_types.contains("/ppt/notesSlides/notesSlide1.xml"));

    let slides = parse_file(&target);
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].text, "Alpha");
}

#[test]
fn extract_preserves_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("deck.pptx");
    let target = dir.path().join("out.pptx");
    write_fixture(&source, &["Alpha", "Beta"]);

    extract_slides(&source, &target, &[1]).unwrap();

    let original = parse_file(&source);
    assert_eq!(original.len(), 2);
    assert_eq!(original[0].text, "Alpha");
}

#[test]
fn extract_results_names_outputs_after_file_ids() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("a.pptx"), &["Budget kickoff", "Other"]);
    write_fixture(&dir.path().join("b.pptx"), &["No match here"]);
    write_fixture(&dir.path().join("c.pptx"), &["Budget wrap-up"]);

    let phrases = PhraseSet::new(["budget"]);
    let results = search_folder(dir.path(), &phrases).unwrap();
    assert_eq!(results.file_count(), 2);

    let written = extract_results(&results, out_dir.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(out_dir.path().join("Extracted_001_a.pptx").is_file());
    assert!(out_dir.path().join("Extracted_003_c.pptx").is_file());

    let extracted = parse_file(&out_dir.path().join("Extracted_001_a.pptx"));
    assert_eq!(extracted.len(), 1);
    assert!(extracted[0].text.contains("Budget"));
}

#[test]
fn corrupt_file_propagates_error() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bad.pptx");
    std::fs::write(&bogus, b"this is not a zip archive").unwrap();

    let phrases = PhraseSet::new(["budget"]);
    assert!(search_folder(dir.path(), &phrases).is_err());
}
