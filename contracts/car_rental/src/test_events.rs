extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::{CarRental, CarRentalClient, GuaranteeRefunded, RentalCreated, RentalReturned};

const DAY: u64 = 86_400;

fn setup() -> (
    Env,
    vehicle_nft::VehicleNftClient<'static>,
    CarRentalClient<'static>,
    Address,
    Address,
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);

    let nft_id = env.register(vehicle_nft::VehicleNft, ());
    let nft = vehicle_nft::VehicleNftClient::new(&env, &nft_id);
    let rental_id = env.register(CarRental, ());
    let rental = CarRentalClient::new(&env, &rental_id);

    let admin = Address::generate(&env);
    let renter = Address::generate(&env);
    let owner = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    token::StellarAssetClient::new(&env, &sac.address()).mint(&renter, &10_000);

    nft.init(&admin);
    nft.set_rental_contract(&admin, &rental_id);
    rental.init(&admin, &nft_id, &sac.address());

    nft.mint_vehicle(
        &admin,
        &owner,
        &String::from_str(&env, "Compact sedan"),
        &String::from_str(&env, "ipfs://sedan.png"),
        &String::from_str(&env, "4 seats, automatic"),
        &String::from_str(&env, "ABC123"),
        &100i128,
        &100i128,
        &10u32,
    );

    (env, nft, rental, admin, renter)
}

#[test]
fn test_rental_created_event() {
    let (env, _nft, client, _admin, renter) = setup();
    let start = env.ledger().timestamp();

    let rental = client.create_rental(&renter, &0, &start, &(start + DAY), &200i128);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events recorded");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        rental.rental_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RentalCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RentalCreated {
            rental_id: rental.rental_id,
            token_id: 0,
            renter: renter.clone(),
            total_price: 100,
        }
    );
}

#[test]
fn test_rental_returned_event() {
    let (env, _nft, client, _admin, renter) = setup();
    let start = env.ledger().timestamp();
    let rental = client.create_rental(&renter, &0, &start, &(start + DAY), &200i128);

    env.ledger().with_mut(|li| li.timestamp += 4 * DAY);
    client.return_rental(&rental.rental_id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events recorded");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("returned").into_val(&env),
        rental.rental_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RentalReturned = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RentalReturned {
            rental_id: rental.rental_id,
            token_id: 0,
            total_interest: 30,
        }
    );
}

#[test]
fn test_guarantee_refunded_event() {
    let (env, _nft, client, _admin, renter) = setup();
    let start = env.ledger().timestamp();
    let rental = client.create_rental(&renter, &0, &start, &(start + DAY), &200i128);

    env.ledger().with_mut(|li| li.timestamp += 4 * DAY);
    client.return_rental(&rental.rental_id);
    client.refund_guarantee(&rental.rental_id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("no events recorded");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refunded").into_val(&env),
        rental.rental_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: GuaranteeRefunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        GuaranteeRefunded {
            rental_id: rental.rental_id,
            renter: renter.clone(),
            payout: 70,
            interest: 30,
        }
    );
}
