//! Local qualifiers carried by a qualified-type wrapper.

use bitflags::bitflags;

bitflags! {
    /// CVR qualifiers. They never change child enumeration; the wrapper
    /// always has exactly one child, its unqualified type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Qualifiers: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
    }
}
