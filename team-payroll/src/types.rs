multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Member agreement — one recurring compensation contract
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, ManagedVecItem, Clone)]
pub struct MemberAgreement<M: ManagedTypeApi> {
    /// Globally unique identifier, assigned on creation and never reused
    pub handle: u64,
    pub account: ManagedAddress<M>,
    /// Length of one compensation period, in seconds
    pub period_length: u64,
    /// Amount owed per whole period, reserved from the team balance up front
    pub period_value: BigUint<M>,
    /// When set, the agreement ends after its first payout
    pub single_term: bool,
    pub next_payout_due: u64,
}
