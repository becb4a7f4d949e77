#[cfg(test)]
mod tests {
    use anchor_lang::prelude::*;
    use crate::utils::*;

    #[test]
    fn test_empty_address_is_created() {
        assert_eq!(
            pda_funding(1_566_000, 0),
            PdaFunding::Create { lamports: 1_566_000 }
        );
    }

    #[test]
    fn test_prefunded_address_is_topped_up() {
        assert_eq!(
            pda_funding(1_566_000, 1),
            PdaFunding::Adopt { top_up: 1_565_999 }
        );
        assert_eq!(
            pda_funding(1_566_000, 5_000_000),
            PdaFunding::Adopt { top_up: 0 }
        );
    }

    #[test]
    fn test_vault_reserve_is_never_disbursable() {
        let reserve = 890_880;

        assert_eq!(disbursable(reserve + 1_000, reserve), 1_000);
        assert_eq!(disbursable(reserve, reserve), 0);
        assert_eq!(disbursable(reserve - 1, reserve), 0);
    }

    #[test]
    fn test_drain_moves_every_lamport() {
        let record_key = Pubkey::new_unique();
        let payee_key = Pubkey::new_unique();
        let owner = crate::ID;

        let mut record_lamports = 1_566_000u64;
        let mut payee_lamports = 10u64;
        let mut record_data = [0u8; 4];
        let mut payee_data = [0u8; 0];

        let record = AccountInfo::new(
            &record_key,
            false,
            true,
            &mut record_lamports,
            &mut record_data,
            &owner,
            false,
            0,
        );
        let payee = AccountInfo::new(
            &payee_key,
            true,
            true,
            &mut payee_lamports,
            &mut payee_data,
            &owner,
            false,
            0,
        );

        drain_lamports(&record, &payee).unwrap();

        assert_eq!(record.lamports(), 0);
        assert_eq!(payee.lamports(), 1_566_010);
    }
}
