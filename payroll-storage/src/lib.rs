#![no_std]

multiversx_sc::imports!();

pub mod payroll_storage_proxy;

/// Generic persistent storage shared by successive payroll logic contracts.
///
/// Values live in typed slots addressed by a `(kind, id, field)` triple;
/// the storage mappers derive a deterministic key from the triple, so any
/// contract pointed at this one resolves the same records. Reads are open
/// and default to the zero value of the lane. Writes are restricted to the
/// writer set, which administers itself: any current writer can authorize
/// or revoke any address, which is how a logic upgrade hands over write
/// authority without touching the data.
#[multiversx_sc::contract]
pub trait PayrollStorage {
    #[init]
    fn init(&self, writers: MultiValueEncoded<ManagedAddress>) {
        let mut count = 0u32;
        for writer in writers {
            require!(!writer.is_zero(), "Invalid writer address");
            self.writers().insert(writer);
            count += 1;
        }
        require!(count > 0, "At least one writer required");
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // Authorization registry
    // ========================================================

    #[endpoint(authorize)]
    fn authorize(&self, address: ManagedAddress) {
        self.require_writer();
        require!(!address.is_zero(), "Invalid writer address");
        self.writers().insert(address);
    }

    #[endpoint(revoke)]
    fn revoke(&self, address: ManagedAddress) {
        self.require_writer();
        self.writers().swap_remove(&address);
    }

    #[view(isAuthorized)]
    fn is_authorized(&self, address: ManagedAddress) -> bool {
        self.writers().contains(&address)
    }

    #[view(getWriters)]
    fn get_writers(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for writer in self.writers().iter() {
            result.push(writer);
        }
        result
    }

    // ========================================================
    // Typed slot lanes
    // ========================================================

    #[view(getUint)]
    fn get_uint(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer) -> BigUint {
        self.uint_slot(&kind, id, &field).get()
    }

    #[endpoint(setUint)]
    fn set_uint(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer, value: BigUint) {
        self.require_writer();
        self.uint_slot(&kind, id, &field).set(&value);
    }

    #[view(getAddress)]
    fn get_address(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer) -> ManagedAddress {
        let slot = self.address_slot(&kind, id, &field);
        if slot.is_empty() {
            return ManagedAddress::zero();
        }
        slot.get()
    }

    #[endpoint(setAddress)]
    fn set_address(
        &self,
        kind: ManagedBuffer,
        id: u64,
        field: ManagedBuffer,
        value: ManagedAddress,
    ) {
        self.require_writer();
        self.address_slot(&kind, id, &field).set(&value);
    }

    #[view(getBool)]
    fn get_bool(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer) -> bool {
        self.bool_slot(&kind, id, &field).get()
    }

    #[endpoint(setBool)]
    fn set_bool(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer, value: bool) {
        self.require_writer();
        self.bool_slot(&kind, id, &field).set(value);
    }

    #[view(getBytes)]
    fn get_bytes(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer) -> ManagedBuffer {
        self.bytes_slot(&kind, id, &field).get()
    }

    #[endpoint(setBytes)]
    fn set_bytes(&self, kind: ManagedBuffer, id: u64, field: ManagedBuffer, value: ManagedBuffer) {
        self.require_writer();
        self.bytes_slot(&kind, id, &field).set(&value);
    }

    // ========================================================
    // Internal
    // ========================================================

    fn require_writer(&self) {
        let caller = self.blockchain().get_caller();
        require!(self.writers().contains(&caller), "Unauthorized");
    }

    // ========================================================
    // Storage
    // ========================================================

    #[storage_mapper("writers")]
    fn writers(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("uintSlot")]
    fn uint_slot(
        &self,
        kind: &ManagedBuffer,
        id: u64,
        field: &ManagedBuffer,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("addressSlot")]
    fn address_slot(
        &self,
        kind: &ManagedBuffer,
        id: u64,
        field: &ManagedBuffer,
    ) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("boolSlot")]
    fn bool_slot(
        &self,
        kind: &ManagedBuffer,
        id: u64,
        field: &ManagedBuffer,
    ) -> SingleValueMapper<bool>;

    #[storage_mapper("bytesSlot")]
    fn bytes_slot(
        &self,
        kind: &ManagedBuffer,
        id: u64,
        field: &ManagedBuffer,
    ) -> SingleValueMapper<ManagedBuffer>;
}
