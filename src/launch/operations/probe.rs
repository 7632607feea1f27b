//! Executable format detection from file headers

use std::fs::File;
use std::io::Read;
use std::path::Path;

const ELF_MAGIC: [u8; 4] = *b"\x7FELF";
const MACHO_MAGICS: [[u8; 4]; 5] = [
    [0xFE, 0xED, 0xFA, 0xCE], // 32-bit, big endian
    [0xFE, 0xED, 0xFA, 0xCF], // 64-bit, big endian
    [0xCE, 0xFA, 0xED, 0xFE], // 32-bit, little endian
    [0xCF, 0xFA, 0xED, 0xFE], // 64-bit, little endian
    [0xCA, 0xFE, 0xBA, 0xBE], // universal (fat) binary
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub is_linux_executable: bool,
    pub is_mac_executable: bool,
}

pub trait BinaryProbe {
    fn probe(&self, path: &Path) -> ProbeResult;
}

/// Reads the first four bytes of a file and matches ELF / Mach-O magics.
/// Unreadable files probe as neither.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderProbe;

impl HeaderProbe {
    pub fn from_header(header: &[u8]) -> ProbeResult {
        let Some(magic) = header.get(..4) else {
            return ProbeResult::default();
        };
        ProbeResult {
            is_linux_executable: magic == ELF_MAGIC,
            is_mac_executable: MACHO_MAGICS.iter().any(|m| magic == m),
        }
    }
}

impl BinaryProbe for HeaderProbe {
    fn probe(&self, path: &Path) -> ProbeResult {
        let mut header = [0u8; 4];
        let read = File::open(path).and_then(|mut f| f.read_exact(&mut header));
        match read {
            Ok(()) => Self::from_header(&header),
            Err(e) => {
                tracing::debug!("launch::probe - Could not read {}: {}", path.display(), e);
                ProbeResult::default()
            }
        }
    }
}
