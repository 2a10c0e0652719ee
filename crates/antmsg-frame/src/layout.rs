use std::fmt;

use crate::codec::MAX_PAYLOAD;
use crate::error::{FrameError, Result};

/// Byte order used for multi-byte data slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least significant byte first (ANT wire order).
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// One slot of a message layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A data-carrying field of the given byte width (1, 2 or 4).
    Data(usize),
    /// Zero-valued padding of the given byte width. Consumes no argument.
    Pad(usize),
}

impl Slot {
    /// Byte width of this slot on the wire.
    pub fn width(&self) -> usize {
        match *self {
            Slot::Data(width) | Slot::Pad(width) => width,
        }
    }

    /// Returns true for data-carrying slots.
    pub fn is_data(&self) -> bool {
        matches!(self, Slot::Data(_))
    }
}

/// Ordered, immutable description of a message payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    slots: Vec<Slot>,
    order: ByteOrder,
    spec: String,
}

impl FieldLayout {
    /// Build a little-endian layout from explicit slots.
    pub fn new(slots: Vec<Slot>) -> Result<Self> {
        Self::with_byte_order(slots, ByteOrder::Little)
    }

    /// Build a layout from explicit slots with an explicit byte order.
    pub fn with_byte_order(slots: Vec<Slot>, order: ByteOrder) -> Result<Self> {
        let spec = render_spec(&slots, order);
        let mut width = 0usize;
        for slot in &slots {
            validate_slot(*slot, &spec)?;
            width = add_width(width, slot.width(), &spec)?;
        }
        Ok(Self { slots, order, spec })
    }

    /// Parse a compact layout spec such as `"BBB"`, `"<B2xH"` or `"8x"`.
    ///
    /// Units: `B` (1-byte data), `H` (2-byte data), `I` (4-byte data),
    /// `x` (1-byte padding). A decimal count repeats a data unit, or widens a
    /// padding unit. An optional leading `<` or `>` selects the byte order.
    /// The total width may not exceed [`MAX_PAYLOAD`].
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: String| FrameError::InvalidLayout {
            spec: spec.to_string(),
            reason,
        };

        let mut chars = spec.chars().peekable();
        let order = match chars.peek() {
            Some('<') => {
                chars.next();
                ByteOrder::Little
            }
            Some('>') => {
                chars.next();
                ByteOrder::Big
            }
            _ => ByteOrder::Little,
        };

        let mut slots = Vec::new();
        let mut width = 0usize;
        let mut count: Option<usize> = None;

        for ch in chars {
            if let Some(digit) = ch.to_digit(10) {
                let next = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(|| invalid("repeat count overflows".to_string()))?;
                count = Some(next);
                continue;
            }

            if ch.is_ascii_whitespace() {
                if count.is_some() {
                    return Err(invalid("whitespace between count and unit".to_string()));
                }
                continue;
            }

            let repeat = count.take().unwrap_or(1);
            if repeat == 0 {
                return Err(invalid(format!("zero repeat count before '{ch}'")));
            }

            match ch {
                'x' => {
                    width = add_width(width, repeat, spec)?;
                    slots.push(Slot::Pad(repeat));
                }
                'B' | 'H' | 'I' => {
                    let unit = match ch {
                        'B' => 1,
                        'H' => 2,
                        _ => 4,
                    };
                    let run = repeat.checked_mul(unit).unwrap_or(usize::MAX);
                    width = add_width(width, run, spec)?;
                    slots.extend(std::iter::repeat(Slot::Data(unit)).take(repeat));
                }
                '<' | '>' => {
                    return Err(invalid("byte order marker must come first".to_string()));
                }
                other => return Err(invalid(format!("unsupported unit '{other}'"))),
            }
        }

        if count.is_some() {
            return Err(invalid("trailing repeat count without unit".to_string()));
        }

        Ok(Self {
            slots,
            order,
            spec: spec.to_string(),
        })
    }

    /// Slots in wire order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Byte order of multi-byte data slots.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Total payload width in bytes. Never above [`MAX_PAYLOAD`].
    pub fn byte_width(&self) -> usize {
        self.slots.iter().map(Slot::width).sum()
    }

    /// Number of logical arguments (data slots).
    pub fn arg_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_data()).count()
    }

    /// The spec this layout was parsed from, or a rendered equivalent.
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

fn validate_slot(slot: Slot, spec: &str) -> Result<()> {
    match slot {
        Slot::Data(1 | 2 | 4) => Ok(()),
        Slot::Data(width) => Err(FrameError::InvalidLayout {
            spec: spec.to_string(),
            reason: format!("data slot width {width} is not 1, 2 or 4"),
        }),
        Slot::Pad(0) => Err(FrameError::InvalidLayout {
            spec: spec.to_string(),
            reason: "padding slot width must be non-zero".to_string(),
        }),
        Slot::Pad(_) => Ok(()),
    }
}

fn add_width(total: usize, width: usize, spec: &str) -> Result<usize> {
    match total.checked_add(width) {
        Some(total) if total <= MAX_PAYLOAD => Ok(total),
        _ => Err(FrameError::InvalidLayout {
            spec: spec.to_string(),
            reason: format!("payload wider than {MAX_PAYLOAD} bytes"),
        }),
    }
}

fn render_spec(slots: &[Slot], order: ByteOrder) -> String {
    let mut spec = String::new();
    if order == ByteOrder::Big {
        spec.push('>');
    }
    for slot in slots {
        match *slot {
            Slot::Data(1) => spec.push('B'),
            Slot::Data(2) => spec.push('H'),
            Slot::Data(4) => spec.push('I'),
            Slot::Data(width) => spec.push_str(&format!("<{width}?>")),
            Slot::Pad(1) => spec.push('x'),
            Slot::Pad(width) => spec.push_str(&format!("{width}x")),
        }
    }
    spec
}
