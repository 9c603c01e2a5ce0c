//! 8.3 file names.

/// A root directory name split into its space-padded name and extension fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortName {
    pub name: [u8; 8],
    pub ext: [u8; 3],
}

impl ShortName {
    /// Splits `path` on its first `.`.
    ///
    /// Returns [`None`] when `path` cannot be expressed as an 8.3 name: it contains a
    /// `/` (no sub-directories), the name is longer than 8 bytes or the extension is
    /// longer than 3 bytes. Case is kept as is.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.as_bytes();
        let mut name = [b' '; 8];
        let mut ext = [b' '; 3];
        let mut i = 0;

        while i < name.len() && i < path.len() && path[i] != b'.' {
            if path[i] == b'/' {
                return None;
            }

            name[i] = path[i];
            i += 1;
        }

        if path.get(i) == Some(&b'.') {
            i += 1;

            let mut j = 0;

            while j < ext.len() && i < path.len() {
                if path[i] == b'/' {
                    return None;
                }

                ext[j] = path[i];
                i += 1;
                j += 1;
            }
        }

        // Anything left over does not fit.
        if i != path.len() {
            return None;
        }

        Some(Self { name, ext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str) -> Option<([u8; 8], [u8; 3])> {
        ShortName::parse(path).map(|n| (n.name, n.ext))
    }

    #[test]
    fn pads_name_and_extension() {
        assert_eq!(parse("README.TXT"), Some((*b"README  ", *b"TXT")));
        assert_eq!(parse("KERNEL.BIN"), Some((*b"KERNEL  ", *b"BIN")));
        assert_eq!(parse("LONGNAME.C"), Some((*b"LONGNAME", *b"C  ")));
        assert_eq!(parse("NOEXT"), Some((*b"NOEXT   ", *b"   ")));
        assert_eq!(parse("A."), Some((*b"A       ", *b"   ")));
    }

    #[test]
    fn keeps_case() {
        assert_eq!(parse("kernel.bin"), Some((*b"kernel  ", *b"bin")));
    }

    #[test]
    fn rejects_slash() {
        assert_eq!(parse("/KERNEL.BIN"), None);
        assert_eq!(parse("BOOT/KERNEL.BIN"), None);
        assert_eq!(parse("KERNEL.B/N"), None);
        assert_eq!(parse("KERNEL.BIN/"), None);
    }

    #[test]
    fn rejects_long_components() {
        assert_eq!(parse("TOOLONGNAME.TXT"), None);
        assert_eq!(parse("KERNEL.ELF64"), None);
        assert_eq!(parse("LONGNAMEX"), None);
    }
}
