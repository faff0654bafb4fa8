//! Preprocessing spec fixtures.

/// Input transform a model applies before consuming a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestTransform {
    OneHot,
    Dummy,
    Ordinal,
    Descriptor,
    Log,
}
