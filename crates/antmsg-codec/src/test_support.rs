use std::sync::Arc;

use antmsg_catalog::{Catalog, MessageDef};

use crate::assembler::MessageAssembler;

/// Channel-management subset used across codec tests.
pub(crate) fn ant_catalog() -> Arc<Catalog> {
    let outbound = [
        MessageDef::new("ANT_UnassignChannel", 0x41, "B", Some(&["channelNumber"])),
        MessageDef::new(
            "ANT_AssignChannel",
            0x42,
            "BBB",
            Some(&["channelNumber", "channelType", "networkNumber"]),
        ),
    ];
    let inbound = [
        MessageDef::new("ANT_ResetSystem", 0x4A, "x", Some(&[])),
        MessageDef::new("ANT_OpenChannel", 0x4B, "B", None),
        MessageDef::new("ANT_CloseChannel", 0x4C, "B", Some(&["channelNumber"])),
    ];
    Arc::new(Catalog::new(&[&outbound, &inbound]).unwrap())
}

pub(crate) fn ant_assembler() -> MessageAssembler {
    MessageAssembler::new(ant_catalog())
}
