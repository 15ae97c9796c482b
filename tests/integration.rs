//! Integration tests: export files on disk through parse, combine and extract.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Timelike};
use classpack::prelude::*;
use classpack::source::read_transcript;
use tempfile::{TempDir, tempdir};
use zip::write::SimpleFileOptions;

// ============================================================================
// Fixtures
// ============================================================================

const KIDDO_CHAT: &str = "\u{200e}[1/5/2026, 9:00:00 AM] Kiddo Music Group: \u{200e}Messages and calls are end-to-end encrypted.
[1/5/26, 9:15:10\u{202f}AM] Vaishnavi Kondapalli: Hi all, I will see the kiddos at 4 today
[1/5/26, 9:20:00\u{202f}AM] Priya: Thank you!
[1/11/26, 8:00:00\u{202f}AM] Vaishnavi Kondapalli: Class is moved to 18th of January
Sorry for the short notice
[1/18/26, 3:30:00\u{202f}PM] Vaishnavi Kondapalli: Practice recording https://drive.google.com/file/d/1AbC/view
[1/25/26, 10:00:00\u{202f}AM] Vaishnavi Kondapalli: Annual Day performance at 11 am, please be on time";

const HINDUSTANI_CHAT: &str = "[5:55 PM, 2/8/2026] Vaishnavi Kondapalli: Class today at 5
[6:10 PM, 2/8/2026] Vaishnavi Kondapalli: class cancelled, sorry
[7:00 PM, 2/8/2026] Ravi: no worries
[9:00 AM, 2/15/2026] Vaishnavi Kondapalli: Online class today, join https://meet.google.com/abc-defg-hij";

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

struct Fixtures {
    _dir: TempDir,
    kiddo_zip: PathBuf,
    hindustani_txt: PathBuf,
    legacy_zip: PathBuf,
}

fn fixtures() -> Fixtures {
    let dir = tempdir().unwrap();

    let kiddo_zip = dir.path().join("WhatsApp Chat - Kiddo Music Group.zip");
    write_zip(
        &kiddo_zip,
        &[("IMG-0001.jpg", "not really a jpeg"), ("_chat.txt", KIDDO_CHAT)],
    );

    let hindustani_txt = dir.path().join("hindustani.txt");
    fs::write(&hindustani_txt, HINDUSTANI_CHAT).unwrap();

    // Older exports name the transcript after the chat.
    let legacy_zip = dir.path().join("legacy.ZIP");
    write_zip(
        &legacy_zip,
        &[("WhatsApp Chat with Hindustani Class.txt", HINDUSTANI_CHAT)],
    );

    Fixtures {
        _dir: dir,
        kiddo_zip,
        hindustani_txt,
        legacy_zip,
    }
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn scenario_time_first_line_to_class_date() {
    let parser = WhatsAppParser::new().unwrap();
    let messages = parser.parse_str("[5:55 PM, 2/8/2026] Vaishnavi Kondapalli: Class today at 5");

    assert_eq!(
        messages,
        vec![Message::new(
            "5:55 PM",
            "2/8/2026",
            "Vaishnavi Kondapalli",
            "Class today at 5"
        )]
    );

    let classes = extract_classes(&messages, "Vaishnavi").unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].date, "2/8/2026");
    assert_eq!(classes[0].time.as_deref(), Some("5"));
    assert_eq!(classes[0].class_type, ClassType::Class);
}

#[test]
fn scenario_two_digit_year_with_seconds() {
    let parser = WhatsAppParser::new().unwrap();
    let messages = parser.parse_str("[7/17/23, 5:54:21 PM] Priya: ok");

    assert_eq!(messages[0].time, "5:54:21 PM");
    assert_eq!(messages[0].date, "7/17/23");
    assert_eq!(messages[0].sender, "Priya");

    let dt = messages[0].datetime().unwrap();
    assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 7, 17).unwrap());
    assert_eq!((dt.hour(), dt.minute()), (17, 54));
}

#[test]
fn scenario_cancellation_same_date_kept() {
    let messages = vec![
        Message::new("9:00 AM", "2/8/2026", "Vaishnavi", "class at 5"),
        Message::new("1:00 PM", "2/8/2026", "Vaishnavi", "class cancelled"),
    ];
    let classes = extract_classes(&messages, "Vaishnavi").unwrap();

    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].class_type, ClassType::Class);
    assert_eq!(classes[1].class_type, ClassType::Cancelled);
    assert_eq!(classes[1].date, classes[0].date);
}

#[test]
fn scenario_continuation_lines() {
    let parser = WhatsAppParser::new().unwrap();

    let messages = parser.parse_str("[5:55 PM, 2/8/2026] Vaishnavi: Class today at 5\nBring the shruti box");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].body, "Class today at 5\nBring the shruti box");

    let orphan = parser.parse_str("Bring the shruti box");
    assert!(orphan.is_empty());
}

#[test]
fn scenario_overlapping_exports_deduplicated() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(
        &first,
        "[5:55 PM, 2/8/2026] Vaishnavi: Class today at 5\n[6:00 PM, 2/8/2026] Priya: ok",
    )
    .unwrap();
    fs::write(
        &second,
        "[5:55 PM, 2/8/2026] Vaishnavi: Class today at 5\n[7:00 PM, 2/8/2026] Ravi: later",
    )
    .unwrap();

    let combined = Combiner::new().unwrap().combine(&[&first, &second]).unwrap();
    let overlapping = combined
        .messages
        .iter()
        .filter(|m| m.body == "Class today at 5")
        .count();

    assert_eq!(overlapping, 1);
    assert_eq!(combined.messages.len(), 3);
    assert_eq!(combined.duplicates(), 1);
}

// ============================================================================
// Export sources
// ============================================================================

#[test]
fn test_zip_export_uses_chat_entry() {
    let fx = fixtures();
    let transcript = read_transcript(&fx.kiddo_zip).unwrap();
    assert!(transcript.origin.ends_with("_chat.txt"));
    assert!(transcript.text.contains("see the kiddos"));
}

#[test]
fn test_legacy_zip_falls_back_to_first_txt() {
    let fx = fixtures();
    let messages = WhatsAppParser::new().unwrap().parse(&fx.legacy_zip).unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].body, "Class today at 5");
}

#[test]
fn test_zip_and_plain_text_parse_identically() {
    let fx = fixtures();
    let parser = WhatsAppParser::new().unwrap();
    assert_eq!(
        parser.parse(&fx.legacy_zip).unwrap(),
        parser.parse(&fx.hindustani_txt).unwrap()
    );
}

#[test]
fn test_kiddo_export_parses_all_messages() {
    let fx = fixtures();
    let messages = WhatsAppParser::new().unwrap().parse(&fx.kiddo_zip).unwrap();

    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0].sender, "Kiddo Music Group");
    assert_eq!(
        messages[3].body,
        "Class is moved to 18th of January\nSorry for the short notice"
    );
    assert_eq!(messages[1].time, "9:15:10 AM");
}

#[test]
fn test_skip_system_messages_drops_encryption_notice() {
    let fx = fixtures();
    let parser =
        WhatsAppParser::with_config(ParserConfig::new().with_skip_system_messages(true)).unwrap();
    let messages = parser.parse(&fx.kiddo_zip).unwrap();
    assert_eq!(messages.len(), 5);
    assert!(messages.iter().all(|m| m.sender != "Kiddo Music Group"));
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_combine_mixed_exports_is_chronological() {
    let fx = fixtures();
    let combined = Combiner::new()
        .unwrap()
        .combine(&[&fx.hindustani_txt, &fx.kiddo_zip, &fx.legacy_zip])
        .unwrap();

    assert!(combined.failed_sources().next().is_none());
    assert_eq!(combined.messages.len(), 10);
    assert_eq!(combined.sources[2].added, 0);

    let times: Vec<_> = combined
        .messages
        .iter()
        .map(|m| m.datetime().unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(combined.messages[0].date, "1/5/2026");
}

#[test]
fn test_combine_tolerates_bad_sources() {
    let fx = fixtures();
    let dir = tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.zip");
    fs::write(&corrupt, "not a zip").unwrap();
    let missing = dir.path().join("missing.zip");

    let combined = Combiner::new()
        .unwrap()
        .combine(&[corrupt.as_path(), missing.as_path(), fx.hindustani_txt.as_path()])
        .unwrap();

    assert_eq!(combined.failed_sources().count(), 2);
    assert_eq!(combined.messages.len(), 4);
}

#[test]
fn test_extract_from_combined_exports() {
    let fx = fixtures();
    let combined = Combiner::new()
        .unwrap()
        .combine(&[&fx.kiddo_zip, &fx.hindustani_txt])
        .unwrap();

    let extractor = ClassExtractor::new(ExtractorConfig::new().with_teacher("vaishnavi")).unwrap();
    let classes = extractor.extract(&combined.messages).unwrap();

    let summary: Vec<_> = classes
        .iter()
        .map(|c| (c.date.as_str(), c.class_type, c.time.as_deref()))
        .collect();
    assert_eq!(
        summary,
        [
            ("1/5/26", ClassType::Class, Some("4")),
            ("1/11/26", ClassType::Rescheduled, None),
            ("1/25/26", ClassType::Performance, Some("11 am")),
            ("2/8/2026", ClassType::Class, Some("5")),
            ("2/8/2026", ClassType::Cancelled, None),
            ("2/15/2026", ClassType::Online, None),
        ]
    );
    assert!(
        classes
            .windows(2)
            .all(|w| w[0].source_timestamp <= w[1].source_timestamp)
    );
}

#[test]
fn test_filters_and_summary() {
    let fx = fixtures();
    let combined = Combiner::new()
        .unwrap()
        .combine(&[&fx.kiddo_zip, &fx.hindustani_txt])
        .unwrap();

    let links = DriveLinkFinder::new().unwrap();
    let summary = ChatSummary::new(&combined.messages, "Vaishnavi", &links);
    assert_eq!(summary.total, 10);
    assert_eq!(summary.from_teacher, 7);
    assert_eq!(summary.with_drive_links, 1);
    assert_eq!(summary.date_range(), Some(("1/5/2026", "2/15/2026")));

    let february = FilterConfig::new().with_date_from("2026-02-01").unwrap();
    let filtered = apply_filters(combined.messages.clone(), &february).unwrap();
    assert_eq!(filtered.len(), 4);

    let ravi = FilterConfig::new().with_sender("RAVI");
    assert_eq!(apply_filters(combined.messages, &ravi).unwrap().len(), 1);
}

#[test]
fn test_drive_links_from_teacher() {
    let fx = fixtures();
    let messages = WhatsAppParser::new().unwrap().parse(&fx.kiddo_zip).unwrap();
    let links = DriveLinkFinder::new().unwrap().links_from(&messages, "Vaishnavi");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://drive.google.com/file/d/1AbC/view");
    assert_eq!(links[0].date, "1/18/26");
}

#[test]
fn test_event_search_over_export() {
    let fx = fixtures();
    let messages = WhatsAppParser::new().unwrap().parse(&fx.kiddo_zip).unwrap();
    let mentions = EventSearch::new().unwrap().search(&messages);

    let labels: Vec<_> = mentions.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, ["Annual Day", "Concert/Performance"]);
    assert!(mentions.iter().all(|m| m.date == "1/25/26"));
}
