use multiversx_sc::proxy_imports::*;

/// Call proxy for the detached storage contract, covering the slot lanes
/// and registry operations this contract consumes.
pub struct PayrollStorageProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for PayrollStorageProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = PayrollStorageProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        PayrollStorageProxyMethods { wrapped_tx: tx }
    }
}

pub struct PayrollStorageProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> PayrollStorageProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn authorize<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        address: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("authorize")
            .argument(&address)
            .original_result()
    }

    pub fn revoke<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        address: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("revoke")
            .argument(&address)
            .original_result()
    }

    pub fn get_uint<
        Arg0: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
    >(
        self,
        kind: Arg0,
        id: Arg1,
        field: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getUint")
            .argument(&kind)
            .argument(&id)
            .argument(&field)
            .original_result()
    }

    pub fn set_uint<
        Arg0: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg3: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        kind: Arg0,
        id: Arg1,
        field: Arg2,
        value: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setUint")
            .argument(&kind)
            .argument(&id)
            .argument(&field)
            .argument(&value)
            .original_result()
    }

    pub fn get_address<
        Arg0: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
    >(
        self,
        kind: Arg0,
        id: Arg1,
        field: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getAddress")
            .argument(&kind)
            .argument(&id)
            .argument(&field)
            .original_result()
    }

    pub fn set_address<
        Arg0: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg3: ProxyArg<ManagedAddress<Env::Api>>,
    >(
        self,
        kind: Arg0,
        id: Arg1,
        field: Arg2,
        value: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setAddress")
            .argument(&kind)
            .argument(&id)
            .argument(&field)
            .argument(&value)
            .original_result()
    }

    pub fn get_bool<
        Arg0: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
    >(
        self,
        kind: Arg0,
        id: Arg1,
        field: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getBool")
            .argument(&kind)
            .argument(&id)
            .argument(&field)
            .original_result()
    }

    pub fn set_bool<
        Arg0: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg3: ProxyArg<bool>,
    >(
        self,
        kind: Arg0,
        id: Arg1,
        field: Arg2,
        value: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setBool")
            .argument(&kind)
            .argument(&id)
            .argument(&field)
            .argument(&value)
            .original_result()
    }
}
