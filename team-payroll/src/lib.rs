#![no_std]

multiversx_sc::imports!();

pub mod storage_proxy;
pub mod team_payroll_proxy;
pub mod types;

use types::MemberAgreement;

// ============================================================
// Slot layout in the storage contract
// ============================================================

/// Workspace-wide counters: `teamCount`, `nextHandle` (entity id 0).
const KIND_META: &[u8] = b"meta";
/// Per-team record: `owner`, `balance`, `memberCount`, `member<N>`.
const KIND_TEAM: &[u8] = b"team";
/// Per-agreement record, keyed by handle.
const KIND_AGREEMENT: &[u8] = b"agreement";

const FIELD_TEAM_COUNT: &[u8] = b"teamCount";
const FIELD_NEXT_HANDLE: &[u8] = b"nextHandle";

const FIELD_OWNER: &[u8] = b"owner";
const FIELD_BALANCE: &[u8] = b"balance";
const FIELD_MEMBER_COUNT: &[u8] = b"memberCount";
const FIELD_MEMBER: &[u8] = b"member";

const FIELD_TEAM: &[u8] = b"team";
const FIELD_ACCOUNT: &[u8] = b"account";
const FIELD_PERIOD_LENGTH: &[u8] = b"periodLength";
const FIELD_PERIOD_VALUE: &[u8] = b"periodValue";
const FIELD_SINGLE_TERM: &[u8] = b"singleTerm";
const FIELD_NEXT_PAYOUT_DUE: &[u8] = b"nextPayoutDue";
const FIELD_MEMBER_INDEX: &[u8] = b"memberIndex";
const FIELD_ACTIVE: &[u8] = b"active";

// ============================================================
// Contract
// ============================================================

/// Treasury and payroll escrow over a detached storage contract.
///
/// Teams hold a fungible-token balance funded by anyone; the operator
/// attaches member agreements that reserve one period's value up front and
/// accrue payouts per elapsed whole period. Payout execution is open to any
/// keeper. Every durable record lives in the storage contract, so `migrate`
/// can hand the same state to a replacement logic instance.
#[multiversx_sc::contract]
pub trait TeamPayroll {
    #[init]
    fn init(
        &self,
        operator: ManagedAddress,
        payment_token: TokenIdentifier,
        storage_address: ManagedAddress,
    ) {
        require!(!operator.is_zero(), "Invalid operator");
        require!(
            payment_token.is_valid_esdt_identifier(),
            "Invalid payment token"
        );
        require!(!storage_address.is_zero(), "Invalid storage address");

        self.operator().set(&operator);
        self.payment_token().set(&payment_token);
        self.storage_address().set(&storage_address);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: createTeam
    // ========================================================

    #[endpoint(createTeam)]
    fn create_team(&self, owner: ManagedAddress) -> u64 {
        self.only_operator();
        require!(!owner.is_zero(), "Invalid team owner");

        let team_id = self.team_count();
        self.set_team_owner(team_id, &owner);
        self.set_team_count(team_id + 1);

        self.team_created_event(team_id, &owner);
        team_id
    }

    // ========================================================
    // ENDPOINT: fundTeam
    // Anyone can top up a team's balance with the payment token.
    // ========================================================

    #[endpoint(fundTeam)]
    #[payable("*")]
    fn fund_team(&self, team_id: u64) {
        require!(team_id < self.team_count(), "Unknown team");

        let (token_id, amount) = self.call_value().single_fungible_esdt();
        require!(
            token_id == self.payment_token().get(),
            "Wrong payment token"
        );
        require!(amount > 0u64, "Funding requires payment");

        let balance = self.team_balance(team_id) + &amount;
        self.set_team_balance(team_id, &balance);

        let caller = self.blockchain().get_caller();
        self.team_funded_event(team_id, &caller, &amount);
    }

    // ========================================================
    // ENDPOINT: addMember
    // Reserves one period's value from the team balance up front.
    // ========================================================

    #[endpoint(addMember)]
    fn add_member(
        &self,
        team_id: u64,
        account: ManagedAddress,
        period_length: u64,
        period_value: BigUint,
        single_term: bool,
    ) -> u64 {
        self.only_operator();
        require!(team_id < self.team_count(), "Unknown team");
        require!(!account.is_zero(), "Invalid member account");
        require!(period_length > 0, "Period length must be positive");
        require!(period_value > 0u64, "Period value must be positive");

        let balance = self.team_balance(team_id);
        require!(balance >= period_value, "Insufficient team balance");
        self.set_team_balance(team_id, &(balance - &period_value));

        let handle = self.allocate_handle();
        let index = self.member_count(team_id);
        let now = self.blockchain().get_block_timestamp();

        self.set_agreement_team(handle, team_id);
        self.set_agreement_account(handle, &account);
        self.set_agreement_period_length(handle, period_length);
        self.set_agreement_period_value(handle, &period_value);
        self.set_agreement_single_term(handle, single_term);
        self.set_agreement_next_payout_due(handle, now + period_length);
        self.set_agreement_member_index(handle, index);
        self.set_agreement_active(handle, true);

        self.set_member_handle(team_id, index, handle);
        self.set_member_count(team_id, index + 1);

        self.member_added_event(team_id, handle, &account);
        handle
    }

    // ========================================================
    // ENDPOINT: removeMember
    // The reservation is consumed linearly across the current
    // period: the consumed share goes to the member, the rest
    // returns to the team. Removal right after creation is a
    // full refund.
    // ========================================================

    #[endpoint(removeMember)]
    fn remove_member(&self, team_id: u64, handle: u64) {
        self.only_operator();
        require!(team_id < self.team_count(), "Unknown team");
        require!(
            self.agreement_active(handle) && self.agreement_team(handle) == team_id,
            "Unknown agreement"
        );

        let now = self.blockchain().get_block_timestamp();
        let period_length = self.agreement_period_length(handle);
        let period_value = self.agreement_period_value(handle);
        let due = self.agreement_next_payout_due(handle);

        let period_start = due.saturating_sub(period_length);
        let elapsed = core::cmp::min(now.saturating_sub(period_start), period_length);
        let consumed = &period_value * elapsed / period_length;
        let refund = &period_value - &consumed;

        if consumed > 0u64 {
            let account = self.agreement_account(handle);
            let token_id = self.payment_token().get();
            self.send().direct_esdt(&account, &token_id, 0, &consumed);
            self.member_paid_event(team_id, handle, &consumed);
        }
        if refund > 0u64 {
            let balance = self.team_balance(team_id) + &refund;
            self.set_team_balance(team_id, &balance);
        }

        self.detach_agreement(team_id, handle);
        self.agreement_ended_event(team_id, handle);
    }

    // ========================================================
    // ENDPOINT: payout / batchPayout
    // Open keeper entry points. Calling before any period has
    // matured is a no-op, so redundant calls are always safe.
    // ========================================================

    #[endpoint(payout)]
    fn payout(&self, team_id: u64) {
        require!(team_id < self.team_count(), "Unknown team");
        self.payout_team(team_id);
    }

    #[endpoint(batchPayout)]
    fn batch_payout(&self, team_ids: MultiValueEncoded<u64>) {
        let count = self.team_count();
        for team_id in team_ids {
            if team_id < count {
                self.payout_team(team_id);
            }
        }
    }

    // ========================================================
    // ENDPOINT: migrate
    // Hands the storage write authority and the pooled token
    // balance to a replacement logic contract. Afterwards any
    // write through this instance aborts in the storage
    // contract; reads keep working but are stale.
    // ========================================================

    #[endpoint(migrate)]
    fn migrate(&self, new_logic: ManagedAddress) {
        self.only_operator();
        require!(!new_logic.is_zero(), "Invalid logic address");

        let storage_address = self.storage_address().get();
        let own_address = self.blockchain().get_sc_address();

        // grant first, then drop own access
        self.tx()
            .to(&storage_address)
            .typed(storage_proxy::PayrollStorageProxy)
            .authorize(&new_logic)
            .sync_call();
        self.tx()
            .to(&storage_address)
            .typed(storage_proxy::PayrollStorageProxy)
            .revoke(&own_address)
            .sync_call();

        let token_id = self.payment_token().get();
        let pooled = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::esdt(token_id.clone()), 0);
        if pooled > 0u64 {
            self.send().direct_esdt(&new_logic, &token_id, 0, &pooled);
        }

        self.logic_migrated_event(&own_address, &new_logic);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// Unknown ids resolve to zero/empty values, matching the slot store's
    /// defaults; callers check existence against `getNumberOfTeams`.
    #[view(getTeam)]
    fn get_team(
        &self,
        team_id: u64,
    ) -> MultiValue3<ManagedAddress, BigUint, ManagedVec<MemberAgreement<Self::Api>>> {
        let owner = self.team_owner(team_id);
        let balance = self.team_balance(team_id);
        let mut members = ManagedVec::new();
        let count = self.member_count(team_id);
        for index in 0..count {
            let handle = self.member_handle(team_id, index);
            members.push(self.load_agreement(handle));
        }
        (owner, balance, members).into()
    }

    #[view(getNumberOfTeams)]
    fn get_number_of_teams(&self) -> u64 {
        self.team_count()
    }

    #[view(getAgreement)]
    fn get_agreement(&self, handle: u64) -> OptionalValue<MemberAgreement<Self::Api>> {
        if !self.agreement_active(handle) {
            return OptionalValue::None;
        }
        OptionalValue::Some(self.load_agreement(handle))
    }

    #[view(getConfig)]
    fn get_config(&self) -> MultiValue3<ManagedAddress, TokenIdentifier, ManagedAddress> {
        (
            self.operator().get(),
            self.payment_token().get(),
            self.storage_address().get(),
        )
            .into()
    }

    // ========================================================
    // INTERNAL: payout engine
    // ========================================================

    fn payout_team(&self, team_id: u64) {
        let now = self.blockchain().get_block_timestamp();
        let token_id = self.payment_token().get();
        let mut balance = self.team_balance(team_id);

        let mut index = 0u64;
        let mut count = self.member_count(team_id);
        while index < count {
            let handle = self.member_handle(team_id, index);
            let due = self.agreement_next_payout_due(handle);
            if now < due {
                index += 1;
                continue;
            }

            let period_length = self.agreement_period_length(handle);
            let period_value = self.agreement_period_value(handle);
            let account = self.agreement_account(handle);

            // at least one whole period has matured
            let elapsed_periods = (now - due) / period_length + 1;

            // the standing reservation covers the first period; further
            // matured periods draw on whatever balance is left
            let mut owed = period_value.clone();
            if elapsed_periods > 1 {
                let mut extra = &period_value * (elapsed_periods - 1);
                if extra > balance {
                    extra = balance.clone();
                }
                balance -= &extra;
                owed += &extra;
            }

            self.send().direct_esdt(&account, &token_id, 0, &owed);
            self.member_paid_event(team_id, handle, &owed);

            let single_term = self.agreement_single_term(handle);
            if !single_term && balance >= period_value {
                balance -= &period_value;
                self.set_agreement_next_payout_due(
                    handle,
                    due + elapsed_periods * period_length,
                );
                index += 1;
            } else {
                // swap-remove moves the last member into this slot
                self.detach_agreement(team_id, handle);
                self.agreement_ended_event(team_id, handle);
                count -= 1;
            }
        }

        self.set_team_balance(team_id, &balance);
    }

    // ========================================================
    // INTERNAL: member list bookkeeping
    // ========================================================

    fn allocate_handle(&self) -> u64 {
        let stored = self.slot_get_u64(KIND_META, 0, ManagedBuffer::from(FIELD_NEXT_HANDLE));
        // handle 0 reads as "unset" in the slot store, so numbering starts at 1
        let handle = if stored == 0 { 1 } else { stored };
        self.slot_set_u64(
            KIND_META,
            0,
            ManagedBuffer::from(FIELD_NEXT_HANDLE),
            handle + 1,
        );
        handle
    }

    fn detach_agreement(&self, team_id: u64, handle: u64) {
        let count = self.member_count(team_id);
        let index = self.agreement_member_index(handle);
        let last_index = count - 1;

        if index != last_index {
            let moved = self.member_handle(team_id, last_index);
            self.set_member_handle(team_id, index, moved);
            self.set_agreement_member_index(moved, index);
        }
        self.set_member_handle(team_id, last_index, 0);
        self.set_member_count(team_id, last_index);
        self.set_agreement_active(handle, false);
    }

    fn load_agreement(&self, handle: u64) -> MemberAgreement<Self::Api> {
        MemberAgreement {
            handle,
            account: self.agreement_account(handle),
            period_length: self.agreement_period_length(handle),
            period_value: self.agreement_period_value(handle),
            single_term: self.agreement_single_term(handle),
            next_payout_due: self.agreement_next_payout_due(handle),
        }
    }

    fn only_operator(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.operator().get(), "Only operator");
    }

    // ========================================================
    // INTERNAL: slot accessors
    // ========================================================

    fn team_count(&self) -> u64 {
        self.slot_get_u64(KIND_META, 0, ManagedBuffer::from(FIELD_TEAM_COUNT))
    }

    fn set_team_count(&self, count: u64) {
        self.slot_set_u64(KIND_META, 0, ManagedBuffer::from(FIELD_TEAM_COUNT), count);
    }

    fn team_owner(&self, team_id: u64) -> ManagedAddress {
        self.slot_get_address(KIND_TEAM, team_id, ManagedBuffer::from(FIELD_OWNER))
    }

    fn set_team_owner(&self, team_id: u64, owner: &ManagedAddress) {
        self.slot_set_address(KIND_TEAM, team_id, ManagedBuffer::from(FIELD_OWNER), owner);
    }

    fn team_balance(&self, team_id: u64) -> BigUint {
        self.slot_get_uint(KIND_TEAM, team_id, ManagedBuffer::from(FIELD_BALANCE))
    }

    fn set_team_balance(&self, team_id: u64, balance: &BigUint) {
        self.slot_set_uint(
            KIND_TEAM,
            team_id,
            ManagedBuffer::from(FIELD_BALANCE),
            balance,
        );
    }

    fn member_count(&self, team_id: u64) -> u64 {
        self.slot_get_u64(KIND_TEAM, team_id, ManagedBuffer::from(FIELD_MEMBER_COUNT))
    }

    fn set_member_count(&self, team_id: u64, count: u64) {
        self.slot_set_u64(
            KIND_TEAM,
            team_id,
            ManagedBuffer::from(FIELD_MEMBER_COUNT),
            count,
        );
    }

    fn member_handle(&self, team_id: u64, index: u64) -> u64 {
        self.slot_get_u64(KIND_TEAM, team_id, self.member_field(index))
    }

    fn set_member_handle(&self, team_id: u64, index: u64, handle: u64) {
        self.slot_set_u64(KIND_TEAM, team_id, self.member_field(index), handle);
    }

    fn member_field(&self, index: u64) -> ManagedBuffer {
        let mut field = ManagedBuffer::from(FIELD_MEMBER);
        field.append_bytes(&index.to_be_bytes());
        field
    }

    fn agreement_team(&self, handle: u64) -> u64 {
        self.slot_get_u64(KIND_AGREEMENT, handle, ManagedBuffer::from(FIELD_TEAM))
    }

    fn set_agreement_team(&self, handle: u64, team_id: u64) {
        self.slot_set_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_TEAM),
            team_id,
        );
    }

    fn agreement_account(&self, handle: u64) -> ManagedAddress {
        self.slot_get_address(KIND_AGREEMENT, handle, ManagedBuffer::from(FIELD_ACCOUNT))
    }

    fn set_agreement_account(&self, handle: u64, account: &ManagedAddress) {
        self.slot_set_address(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_ACCOUNT),
            account,
        );
    }

    fn agreement_period_length(&self, handle: u64) -> u64 {
        self.slot_get_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_PERIOD_LENGTH),
        )
    }

    fn set_agreement_period_length(&self, handle: u64, period_length: u64) {
        self.slot_set_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_PERIOD_LENGTH),
            period_length,
        );
    }

    fn agreement_period_value(&self, handle: u64) -> BigUint {
        self.slot_get_uint(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_PERIOD_VALUE),
        )
    }

    fn set_agreement_period_value(&self, handle: u64, period_value: &BigUint) {
        self.slot_set_uint(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_PERIOD_VALUE),
            period_value,
        );
    }

    fn agreement_single_term(&self, handle: u64) -> bool {
        self.slot_get_bool(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_SINGLE_TERM),
        )
    }

    fn set_agreement_single_term(&self, handle: u64, single_term: bool) {
        self.slot_set_bool(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_SINGLE_TERM),
            single_term,
        );
    }

    fn agreement_next_payout_due(&self, handle: u64) -> u64 {
        self.slot_get_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_NEXT_PAYOUT_DUE),
        )
    }

    fn set_agreement_next_payout_due(&self, handle: u64, due: u64) {
        self.slot_set_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_NEXT_PAYOUT_DUE),
            due,
        );
    }

    fn agreement_member_index(&self, handle: u64) -> u64 {
        self.slot_get_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_MEMBER_INDEX),
        )
    }

    fn set_agreement_member_index(&self, handle: u64, index: u64) {
        self.slot_set_u64(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_MEMBER_INDEX),
            index,
        );
    }

    fn agreement_active(&self, handle: u64) -> bool {
        self.slot_get_bool(KIND_AGREEMENT, handle, ManagedBuffer::from(FIELD_ACTIVE))
    }

    fn set_agreement_active(&self, handle: u64, active: bool) {
        self.slot_set_bool(
            KIND_AGREEMENT,
            handle,
            ManagedBuffer::from(FIELD_ACTIVE),
            active,
        );
    }

    // ========================================================
    // INTERNAL: storage contract calls
    // ========================================================

    fn slot_get_uint(&self, kind: &[u8], id: u64, field: ManagedBuffer) -> BigUint {
        self.tx()
            .to(&self.storage_address().get())
            .typed(storage_proxy::PayrollStorageProxy)
            .get_uint(ManagedBuffer::from(kind), id, field)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn slot_set_uint(&self, kind: &[u8], id: u64, field: ManagedBuffer, value: &BigUint) {
        self.tx()
            .to(&self.storage_address().get())
            .typed(storage_proxy::PayrollStorageProxy)
            .set_uint(ManagedBuffer::from(kind), id, field, value)
            .sync_call();
    }

    fn slot_get_u64(&self, kind: &[u8], id: u64, field: ManagedBuffer) -> u64 {
        self.slot_get_uint(kind, id, field)
            .to_u64()
            .unwrap_or_default()
    }

    fn slot_set_u64(&self, kind: &[u8], id: u64, field: ManagedBuffer, value: u64) {
        self.slot_set_uint(kind, id, field, &BigUint::from(value));
    }

    fn slot_get_address(&self, kind: &[u8], id: u64, field: ManagedBuffer) -> ManagedAddress {
        self.tx()
            .to(&self.storage_address().get())
            .typed(storage_proxy::PayrollStorageProxy)
            .get_address(ManagedBuffer::from(kind), id, field)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn slot_set_address(&self, kind: &[u8], id: u64, field: ManagedBuffer, value: &ManagedAddress) {
        self.tx()
            .to(&self.storage_address().get())
            .typed(storage_proxy::PayrollStorageProxy)
            .set_address(ManagedBuffer::from(kind), id, field, value)
            .sync_call();
    }

    fn slot_get_bool(&self, kind: &[u8], id: u64, field: ManagedBuffer) -> bool {
        self.tx()
            .to(&self.storage_address().get())
            .typed(storage_proxy::PayrollStorageProxy)
            .get_bool(ManagedBuffer::from(kind), id, field)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn slot_set_bool(&self, kind: &[u8], id: u64, field: ManagedBuffer, value: bool) {
        self.tx()
            .to(&self.storage_address().get())
            .typed(storage_proxy::PayrollStorageProxy)
            .set_bool(ManagedBuffer::from(kind), id, field, value)
            .sync_call();
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("teamCreated")]
    fn team_created_event(&self, #[indexed] team_id: u64, #[indexed] owner: &ManagedAddress);

    #[event("teamFunded")]
    fn team_funded_event(
        &self,
        #[indexed] team_id: u64,
        #[indexed] from: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("memberAdded")]
    fn member_added_event(
        &self,
        #[indexed] team_id: u64,
        #[indexed] handle: u64,
        #[indexed] account: &ManagedAddress,
    );

    #[event("memberPaid")]
    fn member_paid_event(
        &self,
        #[indexed] team_id: u64,
        #[indexed] handle: u64,
        amount: &BigUint,
    );

    #[event("agreementEnded")]
    fn agreement_ended_event(&self, #[indexed] team_id: u64, #[indexed] handle: u64);

    #[event("logicMigrated")]
    fn logic_migrated_event(
        &self,
        #[indexed] old_logic: &ManagedAddress,
        #[indexed] new_logic: &ManagedAddress,
    );

    // ========================================================
    // STORAGE (local configuration only; domain state lives in
    // the storage contract)
    // ========================================================

    #[storage_mapper("operator")]
    fn operator(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("paymentToken")]
    fn payment_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("storageAddress")]
    fn storage_address(&self) -> SingleValueMapper<ManagedAddress>;
}
