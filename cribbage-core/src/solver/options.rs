use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Options: u32 {
        /// Score as the dealer's crib: a flush needs all five cards.
        const CribHand       = 0b0001;
        /// Evaluate discards on the calling thread instead of the rayon pool.
        const SingleThreaded = 0b0010;
    }
}
