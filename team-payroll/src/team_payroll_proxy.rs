use multiversx_sc::proxy_imports::*;

use crate::types::MemberAgreement;

pub struct TeamPayrollProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for TeamPayrollProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = TeamPayrollProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        TeamPayrollProxyMethods { wrapped_tx: tx }
    }
}

pub struct TeamPayrollProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> TeamPayrollProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    pub fn init<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<TokenIdentifier<Env::Api>>,
        Arg2: ProxyArg<ManagedAddress<Env::Api>>,
    >(
        self,
        operator: Arg0,
        payment_token: Arg1,
        storage_address: Arg2,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&operator)
            .argument(&payment_token)
            .argument(&storage_address)
            .original_result()
    }
}

impl<Env, From, To, Gas> TeamPayrollProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn create_team<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        owner: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("createTeam")
            .argument(&owner)
            .original_result()
    }

    pub fn fund_team<Arg0: ProxyArg<u64>>(
        self,
        team_id: Arg0,
    ) -> TxTypedCall<Env, From, To, (), Gas, ()> {
        self.wrapped_tx
            .raw_call("fundTeam")
            .argument(&team_id)
            .original_result()
    }

    pub fn add_member<
        Arg0: ProxyArg<u64>,
        Arg1: ProxyArg<ManagedAddress<Env::Api>>,
        Arg2: ProxyArg<u64>,
        Arg3: ProxyArg<BigUint<Env::Api>>,
        Arg4: ProxyArg<bool>,
    >(
        self,
        team_id: Arg0,
        account: Arg1,
        period_length: Arg2,
        period_value: Arg3,
        single_term: Arg4,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("addMember")
            .argument(&team_id)
            .argument(&account)
            .argument(&period_length)
            .argument(&period_value)
            .argument(&single_term)
            .original_result()
    }

    pub fn remove_member<Arg0: ProxyArg<u64>, Arg1: ProxyArg<u64>>(
        self,
        team_id: Arg0,
        handle: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("removeMember")
            .argument(&team_id)
            .argument(&handle)
            .original_result()
    }

    pub fn payout<Arg0: ProxyArg<u64>>(
        self,
        team_id: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("payout")
            .argument(&team_id)
            .original_result()
    }

    pub fn batch_payout<Arg0: ProxyArg<MultiValueEncoded<Env::Api, u64>>>(
        self,
        team_ids: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("batchPayout")
            .argument(&team_ids)
            .original_result()
    }

    pub fn migrate<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        new_logic: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("migrate")
            .argument(&new_logic)
            .original_result()
    }

    pub fn get_team<Arg0: ProxyArg<u64>>(
        self,
        team_id: Arg0,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValue3<
            ManagedAddress<Env::Api>,
            BigUint<Env::Api>,
            ManagedVec<Env::Api, MemberAgreement<Env::Api>>,
        >,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getTeam")
            .argument(&team_id)
            .original_result()
    }

    pub fn get_number_of_teams(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getNumberOfTeams")
            .original_result()
    }

    pub fn get_agreement<Arg0: ProxyArg<u64>>(
        self,
        handle: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, OptionalValue<MemberAgreement<Env::Api>>>
    {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getAgreement")
            .argument(&handle)
            .original_result()
    }

    pub fn get_config(
        self,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValue3<ManagedAddress<Env::Api>, TokenIdentifier<Env::Api>, ManagedAddress<Env::Api>>,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getConfig")
            .original_result()
    }
}
