use multiversx_sc_scenario::imports::*;

use payroll_storage::payroll_storage_proxy;
use team_payroll::team_payroll_proxy;
use team_payroll::types::MemberAgreement;

const OWNER: TestAddress = TestAddress::new("owner");
const OPERATOR: TestAddress = TestAddress::new("operator");
const TEAM_OWNER: TestAddress = TestAddress::new("team-owner");
const MEMBER: TestAddress = TestAddress::new("member");
const FUNDER: TestAddress = TestAddress::new("funder");
const KEEPER: TestAddress = TestAddress::new("keeper");

const PAYROLL_ADDRESS: TestSCAddress = TestSCAddress::new("team-payroll");
const NEW_PAYROLL_ADDRESS: TestSCAddress = TestSCAddress::new("team-payroll-v2");
const STORAGE_ADDRESS: TestSCAddress = TestSCAddress::new("payroll-storage");

const PAYROLL_CODE: MxscPath = MxscPath::new("output/team-payroll.mxsc.json");
const STORAGE_CODE: MxscPath = MxscPath::new("../payroll-storage/output/payroll-storage.mxsc.json");

const TOKEN_ID: TestTokenIdentifier = TestTokenIdentifier::new("DTT-123456");
const OTHER_TOKEN_ID: TestTokenIdentifier = TestTokenIdentifier::new("OTHER-654321");

const START: u64 = 1_000;
const WEEK: u64 = 7 * 24 * 60 * 60;

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.register_contract(PAYROLL_CODE, team_payroll::ContractBuilder);
    blockchain.register_contract(STORAGE_CODE, payroll_storage::ContractBuilder);
    blockchain
}

struct PayrollTestState {
    world: ScenarioWorld,
}

impl PayrollTestState {
    fn new() -> Self {
        let mut world = world();

        world.account(OWNER).nonce(1);
        world.account(OPERATOR).nonce(1).esdt_balance(TOKEN_ID, 1_000);
        world
            .account(FUNDER)
            .nonce(1)
            .esdt_balance(TOKEN_ID, 1_000)
            .esdt_balance(OTHER_TOKEN_ID, 1_000);
        world.account(TEAM_OWNER).nonce(1);
        world.account(MEMBER).nonce(1);
        world.account(KEEPER).nonce(1);
        world.current_block().block_timestamp(START);

        world
            .tx()
            .from(OWNER)
            .typed(payroll_storage_proxy::PayrollStorageProxy)
            .init(MultiValueVec::from(vec![OWNER.to_address()]))
            .code(STORAGE_CODE)
            .new_address(STORAGE_ADDRESS)
            .run();

        world
            .tx()
            .from(OWNER)
            .typed(team_payroll_proxy::TeamPayrollProxy)
            .init(
                OPERATOR.to_address(),
                TOKEN_ID.to_token_identifier(),
                STORAGE_ADDRESS.to_address(),
            )
            .code(PAYROLL_CODE)
            .new_address(PAYROLL_ADDRESS)
            .run();

        world
            .tx()
            .from(OWNER)
            .to(STORAGE_ADDRESS)
            .typed(payroll_storage_proxy::PayrollStorageProxy)
            .authorize(PAYROLL_ADDRESS.to_address())
            .run();

        Self { world }
    }

    fn set_time(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    fn create_team(&mut self) -> u64 {
        self.world
            .tx()
            .from(OPERATOR)
            .to(PAYROLL_ADDRESS)
            .typed(team_payroll_proxy::TeamPayrollProxy)
            .create_team(TEAM_OWNER.to_address())
            .returns(ReturnsResult)
            .run()
    }

    fn fund(&mut self, from: TestAddress, team_id: u64, amount: u64) {
        self.world
            .tx()
            .from(from)
            .to(PAYROLL_ADDRESS)
            .typed(team_payroll_proxy::TeamPayrollProxy)
            .fund_team(team_id)
            .egld_or_single_esdt(
                &EgldOrEsdtTokenIdentifier::esdt(TOKEN_ID),
                0u64,
                &BigUint::from(amount),
            )
            .run();
    }

    fn add_member(
        &mut self,
        team_id: u64,
        period_length: u64,
        period_value: u64,
        single_term: bool,
    ) -> u64 {
        self.world
            .tx()
            .from(OPERATOR)
            .to(PAYROLL_ADDRESS)
            .typed(team_payroll_proxy::TeamPayrollProxy)
            .add_member(
                team_id,
                MEMBER.to_address(),
                period_length,
                BigUint::from(period_value),
                single_term,
            )
            .returns(ReturnsResult)
            .run()
    }

    fn payout(&mut self, team_id: u64) {
        self.world
            .tx()
            .from(KEEPER)
            .to(PAYROLL_ADDRESS)
            .typed(team_payroll_proxy::TeamPayrollProxy)
            .payout(team_id)
            .run();
    }

    fn team_state(
        &mut self,
        to: TestSCAddress,
        team_id: u64,
    ) -> (
        ManagedAddress<StaticApi>,
        BigUint<StaticApi>,
        ManagedVec<StaticApi, MemberAgreement<StaticApi>>,
    ) {
        self.world
            .query()
            .to(to)
            .typed(team_payroll_proxy::TeamPayrollProxy)
            .get_team(team_id)
            .returns(ReturnsResult)
            .run()
            .into_tuple()
    }

    fn assert_team(&mut self, team_id: u64, balance: u64, members: usize) {
        let (_, team_balance, team_members) = self.team_state(PAYROLL_ADDRESS, team_id);
        assert_eq!(team_balance, BigUint::from(balance));
        assert_eq!(team_members.len(), members);
    }
}

#[test]
fn team_creation_is_operator_gated_and_sequential() {
    let mut state = PayrollTestState::new();

    state
        .world
        .tx()
        .from(KEEPER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .create_team(TEAM_OWNER.to_address())
        .returns(ExpectError(4, "Only operator"))
        .run();

    let first = state.create_team();
    let second = state.create_team();
    assert_eq!(first, 0);
    assert_eq!(second, 1);

    let count: u64 = state
        .world
        .query()
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .get_number_of_teams()
        .returns(ReturnsResult)
        .run();
    assert_eq!(count, 2);

    let (owner, balance, members) = state.team_state(PAYROLL_ADDRESS, first);
    assert_eq!(owner, ManagedAddress::from(TEAM_OWNER.to_address()));
    assert_eq!(balance, BigUint::zero());
    assert_eq!(members.len(), 0);

    // unknown ids project as empty, consistent with slot-store defaults
    let (owner, balance, members) = state.team_state(PAYROLL_ADDRESS, 7);
    assert!(owner.is_zero());
    assert_eq!(balance, BigUint::zero());
    assert_eq!(members.len(), 0);
}

#[test]
fn anyone_can_fund_a_known_team_with_the_right_token() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();

    state.fund(OPERATOR, team_id, 100);
    state.fund(FUNDER, team_id, 50);
    state.fund(FUNDER, team_id, 50);
    state.assert_team(team_id, 200, 0);

    // the pooled tokens sit on the logic contract
    state
        .world
        .check_account(PAYROLL_ADDRESS)
        .esdt_balance(TOKEN_ID, 200);

    state
        .world
        .tx()
        .from(FUNDER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .fund_team(9u64)
        .egld_or_single_esdt(
            &EgldOrEsdtTokenIdentifier::esdt(TOKEN_ID),
            0u64,
            &BigUint::from(10u64),
        )
        .returns(ExpectError(4, "Unknown team"))
        .run();

    state
        .world
        .tx()
        .from(FUNDER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .fund_team(team_id)
        .egld_or_single_esdt(
            &EgldOrEsdtTokenIdentifier::esdt(OTHER_TOKEN_ID),
            0u64,
            &BigUint::from(10u64),
        )
        .returns(ExpectError(4, "Wrong payment token"))
        .run();
}

#[test]
fn adding_a_member_reserves_one_period_and_removal_refunds_it() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 200);

    state
        .world
        .tx()
        .from(KEEPER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .add_member(
            team_id,
            MEMBER.to_address(),
            2 * WEEK,
            BigUint::from(100u64),
            false,
        )
        .returns(ExpectError(4, "Only operator"))
        .run();

    state
        .world
        .tx()
        .from(OPERATOR)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .add_member(
            team_id,
            MEMBER.to_address(),
            2 * WEEK,
            BigUint::from(500u64),
            false,
        )
        .returns(ExpectError(4, "Insufficient team balance"))
        .run();

    let handle = state.add_member(team_id, 2 * WEEK, 100, false);
    assert_eq!(handle, 1);
    state.assert_team(team_id, 100, 1);

    // no time elapsed, so the full reservation returns to the team
    state
        .world
        .tx()
        .from(OPERATOR)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .remove_member(team_id, handle)
        .run();
    state.assert_team(team_id, 200, 0);
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 0);

    state
        .world
        .tx()
        .from(OPERATOR)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .remove_member(team_id, handle)
        .returns(ExpectError(4, "Unknown agreement"))
        .run();
}

#[test]
fn payout_pays_whole_periods_and_is_idempotent() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 200);
    let handle = state.add_member(team_id, 2 * WEEK, 100, false);
    state.assert_team(team_id, 100, 1);

    // nothing matured yet; the call is a safe no-op
    state.payout(team_id);
    state.assert_team(team_id, 100, 1);
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 0);

    state.set_time(START + 2 * WEEK);
    state.payout(team_id);
    // the reserved 100 is disbursed and the next period's 100 reserved
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 100);
    state.assert_team(team_id, 0, 1);

    // immediate second call changes nothing
    state.payout(team_id);
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 100);
    state.assert_team(team_id, 0, 1);

    let agreement = state
        .world
        .query()
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .get_agreement(handle)
        .returns(ReturnsResult)
        .run();
    match agreement {
        OptionalValue::Some(agreement) => {
            assert_eq!(agreement.next_payout_due, START + 4 * WEEK);
        }
        OptionalValue::None => panic!("agreement should still be active"),
    }

    // the team cannot reserve a further period, so the next payout ends it
    state.set_time(START + 4 * WEEK);
    state.payout(team_id);
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 200);
    state.assert_team(team_id, 0, 0);

    state
        .world
        .tx()
        .from(KEEPER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .payout(9u64)
        .returns(ExpectError(4, "Unknown team"))
        .run();
}

#[test]
fn single_term_agreement_ends_after_first_payout() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 300);
    state.add_member(team_id, WEEK, 100, true);
    state.assert_team(team_id, 200, 1);

    state.set_time(START + WEEK);
    state.payout(team_id);

    // gone despite the team having plenty of balance left
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 100);
    state.assert_team(team_id, 200, 0);
}

#[test]
fn payout_catches_up_missed_periods_capped_by_balance() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 200);
    state.add_member(team_id, WEEK, 50, false);
    state.assert_team(team_id, 150, 1);

    // three periods mature before the keeper shows up
    state.set_time(START + 3 * WEEK);
    state.payout(team_id);
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 150);
    state.assert_team(team_id, 0, 1);

    // one more period; the last reserved 50 pays out and the agreement ends
    state.set_time(START + 4 * WEEK);
    state.payout(team_id);
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 200);
    state.assert_team(team_id, 0, 0);
}

#[test]
fn mid_period_removal_splits_the_reservation() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 200);
    let handle = state.add_member(team_id, 2 * WEEK, 100, false);
    state.assert_team(team_id, 100, 1);

    state.set_time(START + WEEK);
    state
        .world
        .tx()
        .from(OPERATOR)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .remove_member(team_id, handle)
        .run();

    // half the period elapsed: half the reservation goes to the member,
    // half returns to the team
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 50);
    state.assert_team(team_id, 150, 0);
}

#[test]
fn batch_payout_skips_unknown_teams() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 100);
    state.add_member(team_id, WEEK, 100, false);

    state.set_time(START + WEEK);
    state
        .world
        .tx()
        .from(KEEPER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .batch_payout(MultiValueVec::from(vec![team_id, 7u64, 8u64]))
        .run();

    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 100);
    state.assert_team(team_id, 0, 0);
}

#[test]
fn migration_moves_authority_and_funds_to_the_new_logic() {
    let mut state = PayrollTestState::new();
    let team_id = state.create_team();
    state.fund(OPERATOR, team_id, 200);
    state.add_member(team_id, 2 * WEEK, 100, false);

    state.set_time(START + 2 * WEEK);
    state.payout(team_id);
    state.assert_team(team_id, 0, 1);
    state
        .world
        .check_account(PAYROLL_ADDRESS)
        .esdt_balance(TOKEN_ID, 100);

    state
        .world
        .tx()
        .from(OWNER)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .init(
            OPERATOR.to_address(),
            TOKEN_ID.to_token_identifier(),
            STORAGE_ADDRESS.to_address(),
        )
        .code(PAYROLL_CODE)
        .new_address(NEW_PAYROLL_ADDRESS)
        .run();

    state
        .world
        .tx()
        .from(KEEPER)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .migrate(NEW_PAYROLL_ADDRESS.to_address())
        .returns(ExpectError(4, "Only operator"))
        .run();

    state
        .world
        .tx()
        .from(OPERATOR)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .migrate(NEW_PAYROLL_ADDRESS.to_address())
        .run();

    // the pooled reserve moved over in full
    state
        .world
        .check_account(PAYROLL_ADDRESS)
        .esdt_balance(TOKEN_ID, 0);
    state
        .world
        .check_account(NEW_PAYROLL_ADDRESS)
        .esdt_balance(TOKEN_ID, 100);

    // the new instance sees the same records through the shared storage
    let count: u64 = state
        .world
        .query()
        .to(NEW_PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .get_number_of_teams()
        .returns(ReturnsResult)
        .run();
    assert_eq!(count, 1);
    let (owner, balance, members) = state.team_state(NEW_PAYROLL_ADDRESS, team_id);
    assert_eq!(owner, ManagedAddress::from(TEAM_OWNER.to_address()));
    assert_eq!(balance, BigUint::zero());
    assert_eq!(members.len(), 1);

    // writes through the old instance abort in the storage contract
    state
        .world
        .tx()
        .from(OPERATOR)
        .to(PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .create_team(TEAM_OWNER.to_address())
        .returns(ExpectError(4, "Unauthorized"))
        .run();

    // the keeper keeps working against the new instance
    state.set_time(START + 4 * WEEK);
    state
        .world
        .tx()
        .from(KEEPER)
        .to(NEW_PAYROLL_ADDRESS)
        .typed(team_payroll_proxy::TeamPayrollProxy)
        .payout(team_id)
        .run();
    state.world.check_account(MEMBER).esdt_balance(TOKEN_ID, 200);
    let (_, balance, members) = state.team_state(NEW_PAYROLL_ADDRESS, team_id);
    assert_eq!(balance, BigUint::zero());
    assert_eq!(members.len(), 0);
}
