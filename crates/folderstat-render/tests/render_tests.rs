use folderstat_render::{CSV_HEADER, UploadReport, csv_rows, to_csv_string, to_json, write_csv};
use folderstat_scan::{ExtensionScanner, ScanConfig};
use std::fs;
use tempfile::TempDir;

fn scanned_tree() -> folderstat_scan::ScanResult {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("music/live")).unwrap();
    fs::write(root.join("music/a.mp3"), vec![0u8; 3000]).unwrap();
    fs::write(root.join("music/live/b.MP3"), vec![0u8; 5000]).unwrap();
    fs::write(root.join("music/cover, front.jpg"), vec![0u8; 700]).unwrap();
    fs::write(root.join("notes"), "plain").unwrap();
    fs::write(root.join("weird.\"q\""), "quoted").unwrap();

    ExtensionScanner::new().scan(&ScanConfig::new(root)).unwrap()
}

#[test]
fn test_csv_and_json_agree() {
    let result = scanned_tree();

    let json: serde_json::Value =
        serde_json::from_str(&to_json(&UploadReport::new(&result)).unwrap()).unwrap();
    let extensions = json["extensions"].as_object().unwrap();

    let csv_text = to_csv_string(&result).unwrap();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

    let mut seen = 0;
    for record in reader.records() {
        let record = record.unwrap();
        let entry = &extensions[&record[0]];
        assert_eq!(entry["count"].as_u64().unwrap(), record[1].parse::<u64>().unwrap());
        assert_eq!(entry["size_bytes"].as_u64().unwrap(), record[2].parse::<u64>().unwrap());
        assert_eq!(entry["size_human"].as_str().unwrap(), &record[3]);
        seen += 1;
    }
    assert_eq!(seen, extensions.len());
    assert_eq!(json["total_files"].as_u64().unwrap(), result.total_files);
}

#[test]
fn test_csv_quotes_awkward_keys() {
    let result = scanned_tree();
    let csv_text = to_csv_string(&result).unwrap();

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let keys: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    assert!(keys.contains(&".\"q\"".to_string()));
    assert!(keys.contains(&".mp3".to_string()));
}

#[test]
fn test_streamed_rows_equal_written_export() {
    let result = scanned_tree();

    let mut written = Vec::new();
    write_csv(&result, &mut written).unwrap();

    let streamed: Vec<u8> = csv_rows(result)
        .map(|row| row.unwrap())
        .flatten()
        .collect();
    assert_eq!(streamed, written);
}

#[test]
fn test_json_extension_order_is_sorted() {
    let result = scanned_tree();
    let json = to_json(&UploadReport::new(&result)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let keys: Vec<&String> = value["extensions"].as_object().unwrap().keys().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
