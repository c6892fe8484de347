use bitflags::bitflags;

bitflags! {
    /// Declaration modifiers of a member.
    ///
    /// A field carrying [`STATIC`](Modifiers::STATIC), [`TRANSIENT`](Modifiers::TRANSIENT)
    /// or [`SYNTHETIC`](Modifiers::SYNTHETIC) never becomes a property.
    /// [`PUBLIC`](Modifiers::PUBLIC) feeds the default visibility strategy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1;
        const STATIC = 1 << 1;
        const TRANSIENT = 1 << 2;
        const SYNTHETIC = 1 << 3;
    }
}

impl Modifiers {
    const EXCLUDING: Self = Self::STATIC.union(Self::TRANSIENT).union(Self::SYNTHETIC);

    /// Returns `true` if the member is excluded from binding by its modifiers.
    #[inline]
    pub const fn is_excluded(self) -> bool {
        self.intersects(Self::EXCLUDING)
    }

    /// Returns `true` if the member is declared public.
    #[inline]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }
}
