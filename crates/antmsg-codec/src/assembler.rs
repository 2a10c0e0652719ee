use std::sync::Arc;

use antmsg_catalog::{Catalog, CatalogEntry};
use antmsg_frame::{encode_frame, pack};
use bytes::{Bytes, BytesMut};

use crate::binding::bind_arguments;
use crate::error::Result;

/// Assembles and disassembles messages against a shared, read-only catalog.
///
/// Holds no mutable state; one assembler can serve any number of threads.
#[derive(Debug, Clone)]
pub struct MessageAssembler {
    catalog: Arc<Catalog>,
}

impl MessageAssembler {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// The catalog messages are resolved against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Assemble message `id` into a complete wire frame.
    ///
    /// Positional values fill the leading fields, named values fill fields by
    /// name. The frame is `0xA4 | len | id | payload | xor`.
    pub fn assemble(&self, id: u8, positional: &[u32], named: &[(&str, u32)]) -> Result<Bytes> {
        let entry = self.catalog.lookup(id)?;
        self.assemble_entry(entry, positional, named)
    }

    /// Assemble a message identified by its catalog name.
    pub fn assemble_by_name(
        &self,
        name: &str,
        positional: &[u32],
        named: &[(&str, u32)],
    ) -> Result<Bytes> {
        let entry = self.catalog.lookup_name(name)?;
        self.assemble_entry(entry, positional, named)
    }

    /// Assemble an entry the caller has already resolved from [`Self::catalog`].
    pub fn assemble_entry(
        &self,
        entry: &CatalogEntry,
        positional: &[u32],
        named: &[(&str, u32)],
    ) -> Result<Bytes> {
        let values = bind_arguments(entry, positional, named)?;

        let mut payload = BytesMut::with_capacity(entry.layout().byte_width());
        pack(entry.layout(), &values, &mut payload)?;

        let mut frame = BytesMut::new();
        encode_frame(entry.id(), &payload, &mut frame)?;

        tracing::trace!(
            id = entry.id(),
            name = entry.name(),
            len = frame.len(),
            "assembled message"
        );
        Ok(frame.freeze())
    }
}

#[cfg(test)]
mod tests {
    use antmsg_catalog::CatalogError;
    use antmsg_frame::{checksum, FrameError};

    use super::*;
    use crate::error::CodecError;
    use crate::test_support::ant_assembler;

    #[test]
    fn assemble_with_named_arguments() {
        let asm = ant_assembler();
        let frame = asm
            .assemble(
                0x42,
                &[],
                &[("channelNumber", 3), ("channelType", 0x40), ("networkNumber", 8)],
            )
            .unwrap();

        assert_eq!(&frame[..6], &[0xA4, 0x03, 0x42, 0x03, 0x40, 0x08]);
        assert_eq!(frame[6], 0xAE);
    }

    #[test]
    fn positional_and_named_forms_are_identical() {
        let asm = ant_assembler();
        let named = asm
            .assemble(
                0x42,
                &[],
                &[("channelNumber", 3), ("channelType", 0x40), ("networkNumber", 8)],
            )
            .unwrap();
        let positional = asm.assemble(0x42, &[3, 0x40, 8], &[]).unwrap();
        let mixed = asm
            .assemble(0x42, &[3, 0x40], &[("networkNumber", 8)])
            .unwrap();

        assert_eq!(named, positional);
        assert_eq!(named, mixed);
    }

    #[test]
    fn checksum_byte_is_xor_of_preceding_bytes() {
        let asm = ant_assembler();
        for frame in [
            asm.assemble(0x41, &[7], &[]).unwrap(),
            asm.assemble(0x4A, &[], &[]).unwrap(),
            asm.assemble(0x4B, &[0xFF], &[]).unwrap(),
            asm.assemble(0x42, &[1, 2, 3], &[]).unwrap(),
        ] {
            let (body, sum) = frame.split_at(frame.len() - 1);
            assert_eq!(checksum(body), sum[0]);
            assert_eq!(usize::from(body[1]), body.len() - 3);
        }
    }

    #[test]
    fn padding_only_message() {
        let frame = ant_assembler().assemble(0x4A, &[], &[]).unwrap();
        assert_eq!(frame.as_ref(), &[0xA4, 0x01, 0x4A, 0x00, 0xA4 ^ 0x01 ^ 0x4A]);
    }

    #[test]
    fn unknown_id_fails() {
        let err = ant_assembler().assemble(0xFF, &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Catalog(CatalogError::UnknownMessage(0xFF))
        ));
    }

    #[test]
    fn unknown_argument_fails() {
        let err = ant_assembler()
            .assemble(0x41, &[], &[("unknownArg", 3)])
            .unwrap_err();
        assert!(matches!(err, CodecError::UnknownArgument { .. }));
    }

    #[test]
    fn missing_arguments_fail_count_check() {
        let err = ant_assembler().assemble(0x41, &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Frame(FrameError::ArgumentCountMismatch {
                expected: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn out_of_range_value_fails() {
        let err = ant_assembler().assemble(0x41, &[256], &[]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Frame(FrameError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn assemble_by_name_resolves_id() {
        let asm = ant_assembler();
        let by_name = asm
            .assemble_by_name("ANT_CloseChannel", &[], &[("channelNumber", 2)])
            .unwrap();
        assert_eq!(by_name, asm.assemble(0x4C, &[2], &[]).unwrap());

        assert!(matches!(
            asm.assemble_by_name("ANT_Missing", &[], &[]),
            Err(CodecError::Catalog(CatalogError::UnknownName(_)))
        ));
    }

    #[test]
    fn assemble_entry_matches_assemble_by_id() {
        let asm = ant_assembler();
        let entry = asm.catalog().lookup(0x4C).unwrap();
        assert_eq!(
            asm.assemble_entry(entry, &[2], &[]).unwrap(),
            asm.assemble(0x4C, &[2], &[]).unwrap()
        );
    }

    #[test]
    fn assembler_is_shareable_across_threads() {
        let asm = ant_assembler();
        let handles: Vec<_> = (0..4u32)
            .map(|channel| {
                let asm = asm.clone();
                std::thread::spawn(move || asm.assemble(0x41, &[channel], &[]).unwrap())
            })
            .collect();

        for (channel, handle) in handles.into_iter().enumerate() {
            let frame = handle.join().unwrap();
            assert_eq!(usize::from(frame[3]), channel);
        }
    }
}
