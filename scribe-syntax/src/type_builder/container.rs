use crate::tree::{MemberDeclaration, MemberKind};

/// Rendering group of a member kind. Groups are emitted in ascending order.
fn group(kind: MemberKind) -> u8 {
    match kind {
        MemberKind::Field => 0,
        MemberKind::Constructor => 1,
        MemberKind::Property | MemberKind::Method => 2,
    }
}

/// Append-only collection of member fragments owned by one builder.
///
/// Fragments are never modified once pushed. [`ordered`](Self::ordered)
/// yields fields first, then constructors, then every other member, each
/// group in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberContainer {
    members: Vec<MemberDeclaration>,
}

impl MemberContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, member: impl Into<MemberDeclaration>) {
        self.members.push(member.into());
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Number of fragments of the given kind.
    pub fn count(&self, kind: MemberKind) -> usize {
        self.members.iter().filter(|m| m.kind() == kind).count()
    }

    /// Members in rendering order.
    pub fn ordered(&self) -> impl Iterator<Item = &MemberDeclaration> {
        (0..=2u8).flat_map(move |g| {
            self.members
                .iter()
                .filter(move |member| group(member.kind()) == g)
        })
    }
}

impl<M: Into<MemberDeclaration>> Extend<M> for MemberContainer {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        self.members.extend(iter.into_iter().map(Into::into));
    }
}
