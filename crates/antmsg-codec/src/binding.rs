//! Binding of positional and named arguments to a message's field slots.

use antmsg_catalog::CatalogEntry;
use antmsg_frame::FrameError;

use crate::error::{CodecError, Result};

/// Bind arguments to `entry`'s fields, in field order.
///
/// Positional values fill the leading fields; each named value then fills the
/// field with that name. Entries without field names accept positional values
/// only. Every field must end up with exactly one value.
pub fn bind_arguments(
    entry: &CatalogEntry,
    positional: &[u32],
    named: &[(&str, u32)],
) -> Result<Vec<u32>> {
    if named.is_empty() {
        return Ok(positional.to_vec());
    }

    let Some(fields) = entry.field_names() else {
        return Err(unknown_argument(entry, named[0].0));
    };

    if positional.len() > fields.len() {
        return Err(FrameError::ArgumentCountMismatch {
            expected: fields.len(),
            actual: positional.len() + named.len(),
        }
        .into());
    }

    let mut slots: Vec<Option<u32>> = vec![None; fields.len()];
    for (slot, value) in slots.iter_mut().zip(positional) {
        *slot = Some(*value);
    }

    for &(name, value) in named {
        let index = entry
            .field_index(name)
            .ok_or_else(|| unknown_argument(entry, name))?;
        if slots[index].replace(value).is_some() {
            return Err(CodecError::DuplicateArgument {
                message: entry.name().to_string(),
                argument: name.to_string(),
            });
        }
    }

    let bound: Vec<u32> = slots.iter().flatten().copied().collect();
    if bound.len() != fields.len() {
        return Err(FrameError::ArgumentCountMismatch {
            expected: fields.len(),
            actual: bound.len(),
        }
        .into());
    }
    Ok(bound)
}

fn unknown_argument(entry: &CatalogEntry, name: &str) -> CodecError {
    CodecError::UnknownArgument {
        message: entry.name().to_string(),
        argument: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use antmsg_catalog::MessageDef;

    use super::*;

    fn assign_channel() -> CatalogEntry {
        CatalogEntry::from_def(&MessageDef::new(
            "ANT_AssignChannel",
            0x42,
            "BBB",
            Some(&["channelNumber", "channelType", "networkNumber"]),
        ))
        .unwrap()
    }

    fn open_channel() -> CatalogEntry {
        CatalogEntry::from_def(&MessageDef::new("ANT_OpenChannel", 0x4B, "B", None)).unwrap()
    }

    #[test]
    fn named_arguments_bind_in_field_order() {
        let bound = bind_arguments(
            &assign_channel(),
            &[],
            &[("networkNumber", 8), ("channelNumber", 3), ("channelType", 0x40)],
        )
        .unwrap();
        assert_eq!(bound, vec![3, 0x40, 8]);
    }

    #[test]
    fn positional_then_named() {
        let bound = bind_arguments(
            &assign_channel(),
            &[3],
            &[("networkNumber", 8), ("channelType", 0x40)],
        )
        .unwrap();
        assert_eq!(bound, vec![3, 0x40, 8]);
    }

    #[test]
    fn positional_only_passes_through() {
        let bound = bind_arguments(&open_channel(), &[4], &[]).unwrap();
        assert_eq!(bound, vec![4]);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = bind_arguments(&assign_channel(), &[], &[("unknownArg", 3)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownArgument { argument, .. } if argument == "unknownArg"
        ));
    }

    #[test]
    fn names_rejected_for_unnamed_entries() {
        let err = bind_arguments(&open_channel(), &[], &[("channelNumber", 1)]).unwrap_err();
        assert!(matches!(err, CodecError::UnknownArgument { .. }));
    }

    #[test]
    fn slot_bound_twice_is_rejected() {
        let err = bind_arguments(&assign_channel(), &[3], &[("channelNumber", 4)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::DuplicateArgument { argument, .. } if argument == "channelNumber"
        ));

        let err = bind_arguments(
            &assign_channel(),
            &[],
            &[("channelType", 1), ("channelType", 2)],
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::DuplicateArgument { .. }));
    }

    #[test]
    fn missing_or_excess_values_are_count_mismatches() {
        let err = bind_arguments(&assign_channel(), &[], &[("channelType", 1)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Frame(FrameError::ArgumentCountMismatch {
                expected: 3,
                actual: 1
            })
        ));

        let err =
            bind_arguments(&assign_channel(), &[1, 2, 3, 4], &[("channelType", 1)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Frame(FrameError::ArgumentCountMismatch { .. })
        ));
    }
}
