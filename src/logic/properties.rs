use crate::logic::error::ServiceError;
use crate::logic::validate;
use crate::model::{Id, NewProperty, Property, UpdateProperty};
use crate::store::traits::{InspectionStore, PropertyStore, Store};

pub struct PropertyOps;

impl PropertyOps {
    pub async fn list<S: Store>(store: &S) -> Result<Vec<Property>, ServiceError> {
        Ok(store.list_properties().await?)
    }

    pub async fn get<S: Store>(store: &S, id: &Id) -> Result<Property, ServiceError> {
        store
            .get_property(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Object not found".to_string()))
    }

    pub async fn create<S: Store>(store: &S, new: NewProperty) -> Result<Property, ServiceError> {
        validate::validate_new_property(&new).into_result()?;

        let property = new.into_property();
        store.insert_property(property.clone()).await?;

        Ok(property)
    }

    /// Overwrites all five fields of an existing object
    pub async fn update<S: Store>(
        store: &S,
        update: UpdateProperty,
    ) -> Result<Property, ServiceError> {
        validate::validate_property_update(&update).into_result()?;

        let existing = Self::get(store, &update.id).await?;
        let property = Property {
            id: update.id,
            name: update.name,
            street: update.street,
            number: update.number,
            city: update.city,
            postal_code: update.postal_code,
            created_at: existing.created_at,
            inspection_count: None,
        };

        let updated = store.update_property(property.clone()).await?;
        if !updated {
            return Err(ServiceError::NotFound("Object not found".to_string()));
        }

        Ok(property)
    }

    /// Objects referenced by at least one inspection cannot be deleted
    pub async fn delete<S: Store>(store: &S, id: &Id) -> Result<(), ServiceError> {
        if store.get_property(id).await?.is_none() {
            return Err(ServiceError::NotFound("Object not found".to_string()));
        }

        let references = store.count_inspections_for_object(id).await?;
        if references > 0 {
            return Err(ServiceError::Conflict(
                "Cannot delete object that is used in inspections".to_string(),
            ));
        }

        store.delete_property(id).await?;
        Ok(())
    }
}
