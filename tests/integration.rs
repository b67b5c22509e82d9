//! Integration tests for the matterprops library
//!
//! These tests drive the public API end to end: documents in, typed
//! properties and plain maps out, with the extension points wired in the way
//! callers wire them.

use matterprops::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

const VALID_FRONT_MATTER: &str = "
---
description: test description
number: 221
flag: true
date: 2006-01-02T15:04:05Z07:00
---
test body
";

const NO_FRONT_MATTER: &str = "test body without front matter";

const UNCLOSED_FRONT_MATTER: &str = "
---
description: test description

test body
";

#[test]
fn test_no_front_matter() {
    let factory = CollectionFactory::default();
    let fm = factory
        .mutable_from_front_matter(NO_FRONT_MATTER.as_bytes(), &ExtractOptions::default())
        .unwrap();

    assert!(fm.properties.is_none());
    assert_eq!(fm.count, 0);
    assert_eq!(fm.body_text(), NO_FRONT_MATTER);
}

#[test]
fn test_valid_front_matter() {
    let factory = CollectionFactory::default();
    let fm = factory
        .mutable_from_front_matter(VALID_FRONT_MATTER.as_bytes(), &ExtractOptions::default())
        .unwrap();

    assert_eq!(fm.count, 4);
    assert_eq!(fm.body_text(), "test body");

    let props = fm.properties.unwrap();
    assert_eq!(
        props.named("description").unwrap().any_value(),
        Value::from("test description")
    );
    assert_eq!(props.named("number").unwrap().any_value(), Value::Cardinal(221));
    assert_eq!(props.named("flag").unwrap().any_value(), Value::Flag(true));
    assert_eq!(
        props.named("date").unwrap().any_value(),
        Value::from("2006-01-02T15:04:05Z07:00")
    );
}

#[test]
fn test_valid_smart_parsed_front_matter() {
    let factory = CollectionFactory::default();
    let fm = factory
        .mutable_from_front_matter(VALID_FRONT_MATTER.as_bytes(), &ExtractOptions::smart())
        .unwrap();

    assert_eq!(fm.count, 4);
    assert_eq!(fm.body_text(), "test body");

    let props = fm.properties.unwrap();
    assert_eq!(
        props.named("description").unwrap().as_text(),
        Some("test description")
    );
    assert_eq!(props.named("number").unwrap().as_cardinal(), Some(221));
    assert_eq!(props.named("flag").unwrap().as_flag(), Some(true));

    let expected = chrono::DateTime::parse_from_rfc3339("2006-01-02T15:04:05+07:00").unwrap();
    assert_eq!(props.named("date").unwrap().as_date_time(), Some(&expected));
}

#[test]
fn test_unclosed_front_matter() {
    let factory = CollectionFactory::default();
    let err = factory
        .mutable_from_front_matter(UNCLOSED_FRONT_MATTER.as_bytes(), &ExtractOptions::default())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "unexplained front matter parser error; opened: true, start index: 5, end index: 0"
    );
}

#[test]
fn test_partial_front_matter_is_returned_with_error() {
    let factory = CollectionFactory::default();
    let content = b"---\ntitle: kept\nratio: 0.5\n---\n\n# Body\n";
    let err = factory
        .mutable_from_front_matter(content, &ExtractOptions::default())
        .unwrap_err();

    let partial = err.partial().unwrap();
    assert_eq!(partial.body_text(), "# Body");
    let props = partial.properties.as_ref().unwrap();
    assert_eq!(props.size(), partial.count);
    assert!(props.named("ratio").is_none());
    assert!(err.to_string().contains("unable to add \"ratio\" property"));
}

#[test]
fn test_custom_creator_handles_floats() {
    let ratio = |name: &PropertyName, value: Value| -> Result<Outcome> {
        let text = value.to_string();
        Ok(Outcome::Accepted(Property::text(name.clone(), text)))
    };
    let factory = CollectionFactory::default();
    let options = ExtractOptions {
        create: CreateOptions::with_custom_creator(&ratio),
        ..Default::default()
    };

    let fm = factory
        .mutable_from_front_matter(b"---\nratio: 0.5\ntitle: x\n---\n", &options)
        .unwrap();
    let props = fm.properties.unwrap();
    assert_eq!(fm.count, 2);
    assert_eq!(props.named("ratio").unwrap().as_text(), Some("0.5"));
}

#[test]
fn test_rejected_is_not_failed() {
    let drafts_only = |property: Property| -> Result<Outcome> {
        let name = property.name().to_string();
        match name.as_str() {
            "forbidden" => Err(PropertiesError::custom("forbidden property")),
            "draft" => Ok(Outcome::Accepted(property)),
            _ => Ok(Outcome::Rejected(Some(property))),
        }
    };
    let factory = CollectionFactory::with_config(
        Arc::new(DefaultPropertyFactory::new()),
        CollectionConfig {
            add_policy: Some(Arc::new(drafts_only)),
            ..Default::default()
        },
    );
    let props = factory.empty_mutable();
    let options = CreateOptions::default();

    let accepted = props.add("draft", Value::from(true), &options).unwrap();
    assert!(accepted.is_accepted());

    let rejected = props.add("title", Value::from("x"), &options).unwrap();
    assert!(!rejected.is_accepted());
    assert_eq!(rejected.property().unwrap().as_text(), Some("x"));

    let failed = props.add("forbidden", Value::from(1), &options).unwrap_err();
    assert_eq!(failed.to_string(), "forbidden property");

    assert_eq!(props.size(), 1);
}

#[test]
fn test_smart_parse_rejects_lists() {
    let factory = CollectionFactory::default();
    let content = b"---\ntitle: Hello\ntags: [a, b]\n---\nbody\n";

    let err = factory
        .mutable_from_front_matter(content, &ExtractOptions::smart())
        .unwrap_err();
    assert!(err.is_decode_failure());

    let fm = factory
        .mutable_from_front_matter(content, &ExtractOptions::smart().lenient())
        .unwrap();
    assert!(fm.properties.is_none());
    assert_eq!(fm.body_text(), "body");
}

#[test]
fn test_map_export_serializes() {
    let factory = CollectionFactory::default();
    let fm = factory
        .mutable_from_front_matter(
            b"---\ntitle: Hello\ncount: 3\npublished: 2021-03-04T00:00:00Z\n---\nbody\n",
            &ExtractOptions::smart(),
        )
        .unwrap();
    let map: std::collections::BTreeMap<String, Value> =
        fm.properties.unwrap().to_map().into_iter().collect();

    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "count": 3,
            "published": "2021-03-04T00:00:00Z",
            "title": "Hello",
        })
    );
}

#[test]
fn test_concurrent_adds_lose_nothing() {
    let props = CollectionFactory::default().empty_mutable();
    let threads = 8;
    let per_thread = 250;

    thread::scope(|s| {
        for t in 0..threads {
            let props = &props;
            s.spawn(move || {
                let options = CreateOptions::default();
                for i in 0..per_thread {
                    let name = format!("p-{t}-{i}");
                    props.add(&name, Value::from(i), &options).unwrap();
                }
            });
        }
    });

    assert_eq!(props.size(), threads * per_thread);
    assert_eq!(props.list().len(), threads * per_thread);
}

#[test]
fn test_concurrent_adds_and_deletes_keep_size_consistent() {
    let props = CollectionFactory::default().empty_mutable();
    let options = CreateOptions::default();
    for i in 0..500 {
        props.add(&format!("k{i}"), Value::from(i), &options).unwrap();
    }

    thread::scope(|s| {
        let props = &props;
        s.spawn(move || {
            for i in (0..500).step_by(2) {
                assert!(props.delete(&format!("k{i}")));
            }
        });
        s.spawn(move || {
            let options = CreateOptions::default();
            for i in 500..750 {
                props.add(&format!("k{i}"), Value::from(i), &options).unwrap();
            }
        });
        s.spawn(move || {
            for _ in 0..50 {
                let listed = props.list();
                assert!(listed.len() <= 750);
            }
        });
    });

    assert_eq!(props.size(), 500);
    assert_eq!(props.size(), props.list().len());
}

#[test]
fn test_add_events_from_many_threads() {
    let seen = Arc::new(Mutex::new(HashMap::new()));
    let sink = Arc::clone(&seen);
    let event = move |property: &Property| {
        sink.lock()
            .unwrap()
            .insert(property.name().to_string(), property.any_value());
    };
    let factory = CollectionFactory::with_config(
        Arc::new(DefaultPropertyFactory::new()),
        CollectionConfig {
            add_event: Some(Arc::new(event)),
            ..Default::default()
        },
    );
    let props = factory.empty_mutable();

    thread::scope(|s| {
        for t in 0..4 {
            let props = &props;
            s.spawn(move || {
                let items: HashMap<String, String> = (0..25)
                    .map(|i| (format!("t{t}-{i}"), i.to_string()))
                    .collect();
                let count = props
                    .add_text_map(items, &CreateOptions::default())
                    .unwrap();
                assert_eq!(count, 25);
            });
        }
    });

    assert_eq!(seen.lock().unwrap().len(), 100);
    assert_eq!(props.size(), 100);
}

#[test]
fn test_reader_over_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.md"), "---\ntitle: A\n---\nbody a\n").unwrap();
    fs::write(root.join("b.md"), "no front matter here\n").unwrap();
    fs::write(root.join("notes.txt"), "---\ntitle: ignored\n---\n").unwrap();

    let reader = FrontMatterReader::new();
    let files = io::resolve_files(&[root.to_path_buf()]);
    assert_eq!(files.len(), 2);

    let titles: Vec<Option<String>> = files
        .iter()
        .map(|f| {
            let doc = reader.read_file(f).unwrap();
            doc.properties
                .and_then(|p| p.named("title"))
                .and_then(|p| p.as_text().map(str::to_string))
        })
        .collect();
    assert_eq!(titles, vec![Some("A".to_string()), None]);
}
