//! Sequence Provider: the miner's one external collaborator. Producing the
//! corpus (parsing files, sampling) is explicitly out of scope for this
//! crate's core; this module defines the contract plus the two minimal
//! concrete providers a library consumer needs to exercise it.

use std::path::Path;

use anyhow::Context;
use bio::io::fasta;

/// A restartable, finite source of corpus sequences. Each string yielded is
/// a concatenation of uppercase characters drawn from `{A,C,T,G}` (bytes
/// outside that alphabet are tolerated by the trait itself -- windowing
/// code downstream decides how to handle them, see `corpus::subsequences`).
///
/// Sequence ids are the 0-based position in enumeration order and must be
/// stable across restarts: calling `iter()` twice must yield the same
/// sequences in the same order.
pub trait SequenceProvider {
    fn iter(&self) -> Box<dyn Iterator<Item = String> + '_>;
}

/// The simplest possible provider: an in-memory vector of sequences. Used
/// by the test suite and by library consumers who already have their
/// corpus in memory.
#[derive(Debug, Clone, Default)]
pub struct VecProvider {
    sequences: Vec<String>,
}

impl VecProvider {
    pub fn new(sequences: Vec<String>) -> Self {
        Self { sequences }
    }
}

impl SequenceProvider for VecProvider {
    fn iter(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.sequences.iter().cloned())
    }
}

/// A thin adapter over `bio::io::fasta` for reading a corpus straight off
/// disk. Restart is implemented by reopening the file; no record sampling
/// is implemented (that feature is explicitly out of scope, see
/// SPEC_FULL.md).
pub struct FastaProvider {
    path: std::path::PathBuf,
}

impl FastaProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl SequenceProvider for FastaProvider {
    fn iter(&self) -> Box<dyn Iterator<Item = String> + '_> {
        let reader = fasta::Reader::from_file(&self.path)
            .with_context(|| {
                format!("failed to open fasta file {:?}", self.path)
            })
            .expect("FastaProvider::iter: failed to (re)open corpus file");
        Box::new(reader.records().map(|record| {
            let record = record.expect("malformed fasta record");
            String::from_utf8_lossy(record.seq()).to_uppercase()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_provider_is_restartable() {
        let provider =
            VecProvider::new(vec!["ACGT".to_string(), "TTTT".to_string()]);
        let first: Vec<String> = provider.iter().collect();
        let second: Vec<String> = provider.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["ACGT".to_string(), "TTTT".to_string()]);
    }

    #[test]
    fn fasta_provider_reads_and_uppercases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        writeln!(file, ">seq1\nacgtACGT\n>seq2\nTTTT").unwrap();
        let provider = FastaProvider::new(file.path());
        let seqs: Vec<String> = provider.iter().collect();
        assert_eq!(seqs, vec!["ACGTACGT".to_string(), "TTTT".to_string()]);
        // restartable
        let seqs_again: Vec<String> = provider.iter().collect();
        assert_eq!(seqs, seqs_again);
    }
}
