//! Tests for the container reader

use std::io::Cursor;

use super::*;
use crate::{DIRECTORY_ENTRY_SIZE, HEADER_SIZE, RESOURCE_RECORD_SIZE};

/// (type code, compression, declared size, stored payload)
type Res = (u32, u8, u32, Vec<u8>);

fn build_archive(dirs: &[(u32, Vec<Res>)]) -> Vec<u8> {
    let tables_start = HEADER_SIZE + DIRECTORY_ENTRY_SIZE * dirs.len();
    let tables_len: usize = dirs
        .iter()
        .map(|(_, res)| res.len() * RESOURCE_RECORD_SIZE)
        .sum();
    let mut payload_pos = tables_start + tables_len;

    let mut summaries: Vec<u8> = Vec::new();
    let mut tables: Vec<u8> = Vec::new();
    let mut payloads: Vec<u8> = Vec::new();
    let mut table_pos = tables_start;
    for (comp_buf_size, resources) in dirs {
        summaries.extend((resources.len() as u32).to_be_bytes());
        summaries.extend(comp_buf_size.to_be_bytes());
        summaries.extend((table_pos as u32).to_be_bytes());
        summaries.extend(0u32.to_be_bytes());
        for (type_code, compression, size, payload) in resources {
            tables.extend((((*compression as u32) << 24) | type_code).to_be_bytes());
            tables.extend(size.to_be_bytes());
            tables.extend((payload_pos as u32).to_be_bytes());
            tables.extend(0xDEADBEEFu32.to_be_bytes());
            payloads.extend_from_slice(payload);
            payload_pos += payload.len();
        }
        table_pos += resources.len() * RESOURCE_RECORD_SIZE;
    }

    let mut out = b"BOLT".to_vec();
    out.extend([0u8; 7]);
    out.push(dirs.len() as u8);
    out.extend((payload_pos as u32).to_be_bytes());
    out.extend(summaries);
    out.extend(tables);
    out.extend(payloads);
    out
}

fn open(bytes: Vec<u8>) -> Result<Archive<Cursor<Vec<u8>>>> {
    Archive::open(Cursor::new(bytes))
}

#[test]
fn test_open_single_raw_resource() {
    let bytes = build_archive(&[(0, vec![(42, 8, 4, vec![0xAA, 0xBB, 0xCC, 0xDD])])]);
    let mut archive = open(bytes).unwrap();

    let listing = archive.list_directories();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].index, 0);
    assert_eq!(listing[0].resources.len(), 1);
    assert_eq!(listing[0].resources[0].type_code, 42);

    let res = archive.decode(ResourceId(0x0000)).unwrap();
    assert_eq!(res.type_code, 42);
    assert_eq!(res.data, vec![0xAA, 0xBB, 0xCC, 0xDD]);
}

#[test]
fn test_record_fields() {
    let bytes = build_archive(&[(64, vec![(0x123456, 0, 31, vec![0u8; 32])])]);
    let archive = open(bytes).unwrap();
    let (dir, rec) = archive.record(ResourceId(0)).unwrap();
    assert_eq!(dir.num_resources, 1);
    assert_eq!(dir.comp_buf_size, 64);
    assert_eq!(dir.position as usize, HEADER_SIZE + DIRECTORY_ENTRY_SIZE);
    assert_eq!(rec.type_code, 0x123456);
    assert_eq!(rec.compression, 0);
    assert_eq!(rec.size, 31);
}

#[test]
fn test_bad_magic() {
    let mut bytes = build_archive(&[]);
    bytes[0] = b'X';
    assert!(matches!(open(bytes), Err(BoltError::Format(_))));
}

#[test]
fn test_file_size_mismatch() {
    let mut bytes = build_archive(&[(0, vec![(1, 8, 1, vec![7])])]);
    bytes.push(0);
    assert!(matches!(open(bytes), Err(BoltError::Format(_))));
}

#[test]
fn test_truncated_header() {
    assert!(matches!(
        open(b"BOLT\0\0".to_vec()),
        Err(BoltError::Format(_))
    ));
}

#[test]
fn test_table_past_end_of_file() {
    let mut bytes = build_archive(&[(0, vec![(1, 8, 1, vec![7])])]);
    // Point the resource table past the end
    bytes[HEADER_SIZE + 8..HEADER_SIZE + 12].copy_from_slice(&0xFFFFu32.to_be_bytes());
    assert!(matches!(open(bytes), Err(BoltError::Format(_))));
}

#[test]
fn test_get_record_out_of_range() {
    let bytes = build_archive(&[
        (0, vec![(1, 8, 1, vec![1])]),
        (0, vec![(1, 8, 1, vec![2]), (1, 8, 1, vec![3])]),
    ]);
    let archive = open(bytes).unwrap();

    assert!(archive.record(ResourceId(0x0000)).is_ok());
    assert!(archive.record(ResourceId(0x0101)).is_ok());
    for dir in 2..=255u8 {
        assert!(matches!(
            archive.record(ResourceId::new(dir, 0)),
            Err(BoltError::OutOfRange { .. })
        ));
    }
    assert!(matches!(
        archive.record(ResourceId(0x0001)),
        Err(BoltError::OutOfRange { .. })
    ));
    assert!(matches!(
        archive.record(ResourceId(0x0102)),
        Err(BoltError::OutOfRange { .. })
    ));
}

#[test]
fn test_zero_directories() {
    let mut archive = open(build_archive(&[])).unwrap();
    assert_eq!(archive.num_directories(), 0);
    assert!(archive.list_directories().is_empty());
    assert!(matches!(
        archive.decode(ResourceId(0)),
        Err(BoltError::OutOfRange { .. })
    ));
}

#[test]
fn test_decode_bolt_lz() {
    // "AB" then repeat to 6 bytes, padded to the directory's compBufSize
    let payload = vec![0x1D, b'A', b'B', 0x5F, 0x02, 0, 0, 0];
    let bytes = build_archive(&[(8, vec![(3, 0, 6, payload)])]);
    let mut archive = open(bytes).unwrap();
    assert_eq!(archive.decode(ResourceId(0)).unwrap().data, b"ABABAB");
}

#[test]
fn test_decode_bolt_lz_short_final_read() {
    // compBufSize larger than what remains in the file
    let payload = vec![0x1E, 0x42];
    let bytes = build_archive(&[(1024, vec![(3, 0, 1, payload)])]);
    let mut archive = open(bytes).unwrap();
    assert_eq!(archive.decode(ResourceId(0)).unwrap().data, vec![0x42]);
}

#[test]
fn test_unsupported_compression() {
    let bytes = build_archive(&[(0, vec![(3, 4, 1, vec![0])])]);
    let mut archive = open(bytes).unwrap();
    assert!(matches!(
        archive.decode(ResourceId(0)),
        Err(BoltError::UnsupportedCompression(4))
    ));
}

#[test]
fn test_corrupt_resource_does_not_affect_others() {
    let bytes = build_archive(&[(
        4,
        vec![
            (3, 0, 4, vec![0x5F, 0x00, 0x00, 0x00]),
            (3, 8, 2, vec![0x10, 0x20]),
        ],
    )]);
    let mut archive = open(bytes).unwrap();
    let before = archive.index().clone();

    assert!(matches!(
        archive.decode(ResourceId(0x0000)),
        Err(BoltError::CorruptStream { .. })
    ));
    assert_eq!(archive.index(), &before);
    assert_eq!(archive.decode(ResourceId(0x0001)).unwrap().data, vec![0x10, 0x20]);
}

#[test]
fn test_raw_payload_past_end_of_file() {
    let bytes = build_archive(&[(0, vec![(3, 8, 100, vec![1, 2])])]);
    let mut archive = open(bytes).unwrap();
    assert!(matches!(
        archive.decode(ResourceId(0)),
        Err(BoltError::Format(_))
    ));
}

#[test]
fn test_decode_typed() {
    let bytes = build_archive(&[(0, vec![(7, 8, 1, vec![0x80])])]);
    let mut archive = open(bytes).unwrap();
    assert!(archive.decode_typed(ResourceId(0), 7).is_ok());
    assert!(matches!(
        archive.decode_typed(ResourceId(0), 8),
        Err(BoltError::TypeMismatch {
            expected: 8,
            actual: 7,
            ..
        })
    ));
}

#[test]
fn test_repeated_decode_is_stable() {
    let bytes = build_archive(&[(0, vec![(1, 8, 3, vec![1, 2, 3]), (1, 8, 1, vec![9])])]);
    let mut archive = open(bytes).unwrap();
    let first = archive.decode(ResourceId(0)).unwrap();
    archive.decode(ResourceId(1)).unwrap();
    assert_eq!(archive.decode(ResourceId(0)).unwrap(), first);
}

#[test]
fn test_open_is_deterministic() {
    let bytes = build_archive(&[
        (16, vec![(8, 0, 4, vec![0xDE, 0, 0, 5])]),
        (0, vec![(10, 8, 1, vec![0]), (32, 8, 1, vec![1])]),
    ]);
    let a = open(bytes.clone()).unwrap();
    let b = open(bytes).unwrap();
    assert_eq!(a.index(), b.index());
}

#[test]
fn test_tables_need_not_follow_summaries() {
    // Move the single directory's table to the end of the file
    let mut bytes = build_archive(&[(0, vec![(5, 8, 1, vec![0x77])])]);
    let table_at = HEADER_SIZE + DIRECTORY_ENTRY_SIZE;
    let table = bytes[table_at..table_at + RESOURCE_RECORD_SIZE].to_vec();
    let new_pos = bytes.len() as u32;
    bytes.extend(table);
    let len = bytes.len() as u32;
    bytes[12..16].copy_from_slice(&len.to_be_bytes());
    bytes[HEADER_SIZE + 8..HEADER_SIZE + 12].copy_from_slice(&new_pos.to_be_bytes());

    let mut archive = open(bytes).unwrap();
    assert_eq!(archive.decode(ResourceId(0)).unwrap().data, vec![0x77]);
}
