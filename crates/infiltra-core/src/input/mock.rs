use super::{InputSource, RawButtons};

/// No-hardware input source used during bring-up.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput;

impl MockInput {
    pub const fn new() -> Self {
        Self
    }
}

impl InputSource for MockInput {
    type Error = core::convert::Infallible;

    fn sample(&mut self) -> Result<RawButtons, Self::Error> {
        Ok(RawButtons::RELEASED)
    }
}
