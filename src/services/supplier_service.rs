use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::{
    dto::suppliers::{LoginRequest, RegisterSupplierRequest},
    error::{AppError, AppResult},
    models::{Order, Supplier, SupplierProduct},
    services::order_service,
    state::AppState,
    workflow::Transition,
};

// Checked against when the phone is unknown, so both login failures pay for
// one Argon2 verification.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("unknown-supplier").unwrap_or_default());

/// Registers a supplier. Phone numbers are not required to be unique.
pub async fn register_supplier(
    state: &AppState,
    payload: RegisterSupplierRequest,
) -> AppResult<Supplier> {
    let RegisterSupplierRequest {
        company_name,
        phone,
        representative,
        password,
        products,
    } = payload;
    validate_catalog(&products)?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let supplier = Supplier {
        id: Uuid::new_v4(),
        company_name,
        phone,
        representative,
        password_hash,
        products,
    };
    let supplier = state.store.insert_supplier(supplier).await?;

    tracing::info!(
        supplier_id = %supplier.id,
        products = supplier.products.len(),
        "supplier registered"
    );
    Ok(supplier)
}

/// Checks the phone/password pair. An unknown phone and a wrong password
/// produce the same error.
pub async fn login_supplier(state: &AppState, payload: LoginRequest) -> AppResult<Supplier> {
    let LoginRequest { phone, password } = payload;

    let Some(supplier) = state.store.find_supplier_by_phone(&phone).await? else {
        let _ = password_matches(&password, &DUMMY_HASH);
        return Err(AppError::Unauthorized);
    };

    if !password_matches(&password, &supplier.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    tracing::info!(supplier_id = %supplier.id, "supplier logged in");
    Ok(supplier)
}

pub async fn list_suppliers(state: &AppState) -> AppResult<Vec<Supplier>> {
    let suppliers = state.store.list_suppliers().await?;
    tracing::debug!(count = suppliers.len(), "listed suppliers");
    Ok(suppliers)
}

pub async fn list_supplier_orders(state: &AppState, supplier_id: Uuid) -> AppResult<Vec<Order>> {
    let orders = state.store.list_orders_for_supplier(supplier_id).await?;
    tracing::debug!(%supplier_id, count = orders.len(), "listed supplier orders");
    Ok(orders)
}

/// Supplier accepts an order, moving it to `InProcess`.
pub async fn approve_order(state: &AppState, id: Uuid) -> AppResult<Order> {
    order_service::transition_order(state, id, Transition::Approve).await
}

fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn password_matches(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn validate_catalog(products: &[SupplierProduct]) -> AppResult<()> {
    for product in products {
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(AppError::BadRequest(format!(
                "Invalid price for product {}",
                product.name
            )));
        }
        if product.min_order_qty < 1 {
            return Err(AppError::BadRequest(format!(
                "Invalid minimum order quantity for product {}",
                product.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, min_order_qty: i32) -> SupplierProduct {
        SupplierProduct {
            name: "Milk".into(),
            price,
            min_order_qty,
        }
    }

    #[test]
    fn unknown_phone_check_costs_the_same_as_a_real_one() {
        let real = hash_password("x").unwrap();
        let real = PasswordHash::new(&real).unwrap();
        let dummy = PasswordHash::new(&DUMMY_HASH).unwrap();

        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(dummy.version, real.version);
        assert_eq!(dummy.params, real.params);
        assert!(!password_matches("x", &DUMMY_HASH).unwrap());
    }

    #[test]
    fn password_matches_only_the_hashed_secret() {
        let hash = hash_password("x").unwrap();
        assert!(password_matches("x", &hash).unwrap());
        assert!(!password_matches("y", &hash).unwrap());
        assert!(password_matches("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn catalog_accepts_free_products() {
        assert!(validate_catalog(&[product(0.0, 1), product(12.5, 40)]).is_ok());
    }

    #[test]
    fn catalog_rejects_bad_values() {
        assert!(matches!(
            validate_catalog(&[product(-1.0, 1)]),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_catalog(&[product(f64::NAN, 1)]),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_catalog(&[product(3.0, 0)]),
            Err(AppError::BadRequest(_))
        ));
    }
}
