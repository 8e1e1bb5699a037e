//! Raw binary persistence of packed links and rank vectors.
//!
//! Both formats are plain big-endian streams with no header or length
//! prefix, consumed until end-of-data:
//!
//! - links: `i32` values in the packed record layout of
//!   [`LinkStore`](crate::graph::LinkStore)
//! - ranks: one `f64` per page id in ascending id order, length `id_limit`
//!
//! The rank file is the hand-off artifact between the compute run and the
//! title-sorting stage, and doubles as a cache for external consumers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::Error;
use crate::graph::LinkStore;

/// Read a packed link stream, validating it as a [`LinkStore`].
pub fn read_links<R: Read>(mut reader: R) -> Result<LinkStore, Error> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    if raw.len() % 4 != 0 {
        return Err(Error::MisalignedStream {
            len: raw.len(),
            unit: 4,
        });
    }
    let data = raw
        .chunks_exact(4)
        .map(|chunk| i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    LinkStore::from_packed(data)
}

/// Write a link store as a packed big-endian `i32` stream.
pub fn write_links<W: Write>(mut writer: W, links: &LinkStore) -> Result<(), Error> {
    for &value in links.as_slice() {
        writer.write_all(&value.to_be_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a rank vector from a big-endian `f64` stream.
pub fn read_ranks<R: Read>(mut reader: R) -> Result<Vec<f64>, Error> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    if raw.len() % 8 != 0 {
        return Err(Error::MisalignedStream {
            len: raw.len(),
            unit: 8,
        });
    }
    Ok(raw
        .chunks_exact(8)
        .map(|chunk| {
            f64::from_be_bytes([
                chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
            ])
        })
        .collect())
}

/// Write a rank vector as a big-endian `f64` stream, one value per id in
/// ascending id order.
pub fn write_ranks<W: Write>(mut writer: W, ranks: &[f64]) -> Result<(), Error> {
    for &rank in ranks {
        writer.write_all(&rank.to_be_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a packed link file.
pub fn read_links_file(path: impl AsRef<Path>) -> Result<LinkStore, Error> {
    read_links(BufReader::new(File::open(path)?))
}

/// Write a packed link file.
pub fn write_links_file(path: impl AsRef<Path>, links: &LinkStore) -> Result<(), Error> {
    write_links(BufWriter::new(File::create(path)?), links)
}

/// Read a rank vector file.
pub fn read_ranks_file(path: impl AsRef<Path>) -> Result<Vec<f64>, Error> {
    read_ranks(BufReader::new(File::open(path)?))
}

/// Write a rank vector file.
pub fn write_ranks_file(path: impl AsRef<Path>, ranks: &[f64]) -> Result<(), Error> {
    write_ranks(BufWriter::new(File::create(path)?), ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_round_trip() {
        let ranks = vec![0.25, 0.0, 0.75, 1e-12];
        let mut buf = Vec::new();
        write_ranks(&mut buf, &ranks).unwrap();
        assert_eq!(buf.len(), 32);

        let back = read_ranks(buf.as_slice()).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&ranks), bits(&back));
    }

    #[test]
    fn test_ranks_big_endian_layout() {
        let mut buf = Vec::new();
        write_ranks(&mut buf, &[1.0]).unwrap();
        assert_eq!(buf, vec![0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_links_round_trip() {
        let store = LinkStore::from_edges(&[(0, 1), (2, 1), (1, 3)]);
        let mut buf = Vec::new();
        write_links(&mut buf, &store).unwrap();

        let back = read_links(buf.as_slice()).unwrap();
        assert_eq!(back.as_slice(), store.as_slice());
    }

    #[test]
    fn test_links_big_endian_layout() {
        let store = LinkStore::from_packed(vec![1, 1, 256]).unwrap();
        let mut buf = Vec::new();
        write_links(&mut buf, &store).unwrap();
        assert_eq!(buf, vec![0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_misaligned_rank_stream_rejected() {
        let err = read_ranks(&[0u8; 9][..]).unwrap_err();
        assert!(matches!(err, Error::MisalignedStream { len: 9, unit: 8 }));
    }

    #[test]
    fn test_misaligned_link_stream_rejected() {
        let err = read_links(&[0u8; 6][..]).unwrap_err();
        assert!(matches!(err, Error::MisalignedStream { len: 6, unit: 4 }));
    }

    #[test]
    fn test_malformed_link_file_surfaces_store_error() {
        // Well-aligned bytes that decode to a truncated record.
        let mut buf = Vec::new();
        buf.extend(5_i32.to_be_bytes());
        let err = read_links(buf.as_slice()).unwrap_err();
        assert!(matches!(err, Error::TruncatedRecord { .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let links_path = dir.path().join("links.raw");
        let ranks_path = dir.path().join("ranks.raw");

        let store = LinkStore::from_edges(&[(0, 1), (1, 0)]);
        write_links_file(&links_path, &store).unwrap();
        let back = read_links_file(&links_path).unwrap();
        assert_eq!(back.as_slice(), store.as_slice());

        let ranks = vec![0.5, 0.5];
        write_ranks_file(&ranks_path, &ranks).unwrap();
        assert_eq!(read_ranks_file(&ranks_path).unwrap(), ranks);
    }
}
