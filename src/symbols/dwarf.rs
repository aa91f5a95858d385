//! DWARF-backed symbol resolver.
//!
//! Translates sampled addresses of one binary to source locations using
//! `addr2line`. Inlined call chains are reported innermost first.

use super::frame::StackFrame;
use super::resolver::SymbolResolver;
use crate::sampler::Address;
use crate::utils::config::{UNKNOWN_FILE, UNKNOWN_FUNCTION};
use crate::utils::error::ResolveError;
use addr2line::Context;
use log::{debug, info};
use std::path::Path;

type Reader = addr2line::gimli::EndianReader<addr2line::gimli::RunTimeEndian, std::rc::Rc<[u8]>>;

/// Resolver for a single binary with debug information
pub struct DwarfResolver {
    context: Context<Reader>,
    load_bias: u64,
}

impl DwarfResolver {
    /// Load DWARF data from an ELF/Mach-O/PE binary
    ///
    /// # Errors
    /// * `ResolveError::Io` - the file cannot be read
    /// * `ResolveError::Object` - the file is not a supported object format
    /// * `ResolveError::Dwarf` - the debug sections are malformed
    pub fn open<P: AsRef<Path>>(binary: P) -> Result<Self, ResolveError> {
        let path = binary.as_ref();
        debug!("Loading binary for symbolication: {}", path.display());

        let data = std::fs::read(path)?;
        let obj = object::File::parse(&*data)?;
        let context = Context::new(&obj)?;

        info!("Loaded debug information from {}", path.display());

        Ok(Self {
            context,
            load_bias: 0,
        })
    }

    /// Subtract `bias` from every address before lookup
    ///
    /// Needed when the sampled process mapped the binary at a different
    /// base than its link address.
    pub fn with_load_bias(mut self, bias: u64) -> Self {
        self.load_bias = bias;
        self
    }

    fn unknown(address: Address) -> StackFrame {
        StackFrame {
            function: format!("{UNKNOWN_FUNCTION} {address:#x}"),
            file: UNKNOWN_FILE.to_string(),
            line: 0,
            is_native: true,
        }
    }
}

impl SymbolResolver for DwarfResolver {
    /// Addresses without location info belong to code we have no source
    /// for; they come back as a single native frame.
    fn resolve(&mut self, address: Address) -> Result<Vec<StackFrame>, ResolveError> {
        let Some(probe) = address.checked_sub(self.load_bias) else {
            return Ok(vec![Self::unknown(address)]);
        };

        let mut iter = self.context.find_frames(probe).skip_all_loads()?;
        let mut frames = Vec::new();

        while let Some(frame) = iter.next()? {
            let function = frame
                .function
                .as_ref()
                .and_then(|f| f.demangle().ok().map(|d| d.into_owned()))
                .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());

            match frame.location.as_ref().and_then(|l| l.file.map(|file| (file, l.line))) {
                Some((file, line)) => frames.push(StackFrame {
                    function,
                    file: file.to_string(),
                    line: line.unwrap_or(0),
                    is_native: false,
                }),
                None => frames.push(StackFrame {
                    function,
                    file: UNKNOWN_FILE.to_string(),
                    line: 0,
                    is_native: true,
                }),
            }
        }

        if frames.is_empty() {
            frames.push(Self::unknown(address));
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_binary() {
        let result = DwarfResolver::open("/nonexistent/samplestat-binary");
        assert!(matches!(result, Err(ResolveError::Io(_))));
    }

    #[test]
    fn test_not_an_object_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not an ELF file").unwrap();

        let result = DwarfResolver::open(file.path());
        assert!(matches!(result, Err(ResolveError::Object(_))));
    }

    #[cfg(target_os = "linux")]
    #[inline(never)]
    fn dwarf_lookup_target(x: u64) -> u64 {
        std::hint::black_box(x).wrapping_mul(31).rotate_left(7)
    }

    /// Runtime address of `dwarf_lookup_target` and the load bias of the
    /// running test binary
    #[cfg(target_os = "linux")]
    fn own_symbol() -> (u64, u64) {
        use object::{Object, ObjectSymbol};

        let exe = std::env::current_exe().unwrap();
        let data = std::fs::read(&exe).unwrap();
        let obj = object::File::parse(&*data).unwrap();
        let link = obj
            .symbols()
            .find(|sym| sym.name().map_or(false, |n| n.contains("dwarf_lookup_target")))
            .map(|sym| sym.address())
            .unwrap();

        let f: fn(u64) -> u64 = dwarf_lookup_target;
        let runtime = std::hint::black_box(f) as usize as u64;
        assert_eq!(f(1), 31 << 7);
        (runtime, runtime - link)
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_resolves_function_in_current_exe() {
        let (runtime, bias) = own_symbol();
        let mut resolver = DwarfResolver::open(std::env::current_exe().unwrap())
            .unwrap()
            .with_load_bias(bias);

        let frames = resolver.resolve(runtime).unwrap();
        let outer = frames.last().unwrap();

        assert!(outer.function.contains("dwarf_lookup_target"), "{outer}");
        assert!(outer.file.ends_with("dwarf.rs"), "{outer}");
        assert!(outer.line > 0);
        assert!(!outer.is_native);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unmapped_addresses_are_native() {
        let mut resolver = DwarfResolver::open(std::env::current_exe().unwrap())
            .unwrap()
            .with_load_bias(0x1000);

        let below_bias = resolver.resolve(0x10).unwrap();
        assert_eq!(below_bias.len(), 1);
        assert!(below_bias[0].is_native);

        let past_end = resolver.resolve(u64::MAX - 0x10).unwrap();
        assert_eq!(past_end.len(), 1);
        assert!(past_end[0].is_native);
    }

    #[test]
    fn test_unknown_frame_is_native() {
        let frame = DwarfResolver::unknown(0x1234);
        assert!(frame.is_native);
        assert!(frame.function.ends_with("0x1234"));
    }
}
