use byteorder::{ByteOrder, LittleEndian};
use core::fmt::{self, Display, Formatter, Write};

/// Size of one record in the root directory.
pub const ENTRY_SIZE: usize = 32;

// First name byte of a record.
pub const ENTRY_EMPTY: u8 = 0x00;
pub const ENTRY_DELETED: u8 = 0xE5;

// Attribute byte of a record.
pub const ATTR_VOLUME_ID: u8 = 0x08;
pub const ATTR_DIRECTORY: u8 = 0x10;
pub const ATTR_LONG_FILENAME: u8 = 0x0F;

/// A root directory record, copied out of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    name: [u8; 8],
    ext: [u8; 3],
    attributes: u8,
    cluster_index: u16,
    file_size: u32,
}

impl DirEntry {
    pub fn from_bytes(raw: &[u8; ENTRY_SIZE]) -> Self {
        let mut name = [0u8; 8];
        let mut ext = [0u8; 3];

        name.copy_from_slice(&raw[0..8]);
        ext.copy_from_slice(&raw[8..11]);

        Self {
            name,
            ext,
            attributes: raw[11],
            cluster_index: LittleEndian::read_u16(&raw[26..28]),
            file_size: LittleEndian::read_u32(&raw[28..32]),
        }
    }

    pub fn name(&self) -> &[u8; 8] {
        &self.name
    }

    pub fn ext(&self) -> &[u8; 3] {
        &self.ext
    }

    pub fn attributes(&self) -> u8 {
        self.attributes
    }

    pub fn cluster_index(&self) -> u16 {
        self.cluster_index
    }

    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    /// `false` for never used and deleted records.
    pub fn is_live(&self) -> bool {
        self.name[0] != ENTRY_EMPTY && self.name[0] != ENTRY_DELETED
    }

    pub fn is_long_filename(&self) -> bool {
        self.attributes == ATTR_LONG_FILENAME
    }

    pub fn is_directory(&self) -> bool {
        self.attributes & ATTR_DIRECTORY != 0
    }

    pub fn is_volume_label(&self) -> bool {
        self.attributes & ATTR_VOLUME_ID != 0
    }

    /// The name as `NAME.EXT` with the padding removed.
    pub fn display_name(&self) -> DisplayName<'_> {
        DisplayName(self)
    }
}

pub struct DisplayName<'a>(&'a DirEntry);

impl Display for DisplayName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = trim_padding(&self.0.name);
        let ext = trim_padding(&self.0.ext);

        for &b in name {
            f.write_char(b as char)?;
        }

        if !ext.is_empty() {
            f.write_char('.')?;

            for &b in ext {
                f.write_char(b as char)?;
            }
        }

        Ok(())
    }
}

fn trim_padding(field: &[u8]) -> &[u8] {
    let end = field.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);

    &field[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &[u8; 11], attributes: u8, cluster: u16, size: u32) -> [u8; ENTRY_SIZE] {
        let mut raw = [0u8; ENTRY_SIZE];

        raw[..11].copy_from_slice(name);
        raw[11] = attributes;
        raw[26..28].copy_from_slice(&cluster.to_le_bytes());
        raw[28..32].copy_from_slice(&size.to_le_bytes());
        raw
    }

    #[test]
    fn decode_record() {
        let entry = DirEntry::from_bytes(&record(b"README  TXT", 0x20, 5, 37));

        assert_eq!(entry.name(), b"README  ");
        assert_eq!(entry.ext(), b"TXT");
        assert_eq!(entry.cluster_index(), 5);
        assert_eq!(entry.file_size(), 37);
        assert!(entry.is_live());
        assert!(!entry.is_directory());
        assert_eq!(entry.display_name().to_string(), "README.TXT");
    }

    #[test]
    fn record_states() {
        let deleted = DirEntry::from_bytes(&record(b"\xE5EADME  TXT", 0x20, 5, 37));
        let empty = DirEntry::from_bytes(&[0u8; ENTRY_SIZE]);
        let lfn = DirEntry::from_bytes(&record(b"AKERNEL BIN", ATTR_LONG_FILENAME, 0, 0));
        let dir = DirEntry::from_bytes(&record(b"BOOT       ", ATTR_DIRECTORY, 3, 0));

        assert!(!deleted.is_live());
        assert!(!empty.is_live());
        assert!(lfn.is_long_filename());
        assert!(dir.is_directory());
        assert_eq!(dir.display_name().to_string(), "BOOT");
    }
}
