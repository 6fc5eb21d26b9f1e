//! Repository for driver and bus operations.
//!
//! Each write is a full read-modify-write of one collection under its writer lock.

use std::path::Path;

use chrono::Utc;

use super::{FileBackend, Persistence, RecordStore};
use crate::errors::AppError;
use crate::models::{BusRecord, DriverRecord, DriverStatus, NewBus, NewDriver};

/// Repository over the driver and bus collections.
pub struct Repository {
    drivers: RecordStore<DriverRecord>,
    buses: RecordStore<BusRecord>,
}

impl Repository {
    pub fn new(drivers: Box<dyn Persistence>, buses: Box<dyn Persistence>) -> Self {
        Self {
            drivers: RecordStore::new("driver", drivers),
            buses: RecordStore::new("bus", buses),
        }
    }

    /// Repository over two JSON collection files.
    pub fn open(drivers_path: &Path, buses_path: &Path) -> Self {
        let drivers = FileBackend::new(drivers_path);
        let buses = FileBackend::new(buses_path);
        tracing::info!("Driver collection: {:?}", drivers.path());
        tracing::info!("Bus collection: {:?}", buses.path());
        Self::new(Box::new(drivers), Box::new(buses))
    }

    /// Repository that never touches disk.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        use super::MemoryBackend;
        Self::new(Box::new(MemoryBackend::new()), Box::new(MemoryBackend::new()))
    }

    // ==================== DRIVER OPERATIONS ====================

    /// Append a new pending registration.
    pub async fn register_driver(&self, new: NewDriver) -> Result<DriverRecord, AppError> {
        let driver = DriverRecord {
            id: new_record_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            photo: new.photo,
            license: new.license,
            status: DriverStatus::Pending,
            submitted_at: Utc::now().to_rfc3339(),
        };

        let stored = driver.clone();
        self.drivers
            .update(move |drivers| {
                drivers.push(stored);
                Ok(())
            })
            .await?;

        Ok(driver)
    }

    /// List every registration in submission order.
    pub async fn list_drivers(&self) -> Result<Vec<DriverRecord>, AppError> {
        self.drivers.load().await
    }

    /// List registrations still awaiting a decision.
    pub async fn list_pending_drivers(&self) -> Result<Vec<DriverRecord>, AppError> {
        let drivers = self.drivers.load().await?;
        Ok(drivers
            .into_iter()
            .filter(|d| d.status == DriverStatus::Pending)
            .collect())
    }

    /// Get a registration by ID.
    pub async fn get_driver(&self, id: &str) -> Result<Option<DriverRecord>, AppError> {
        let drivers = self.drivers.load().await?;
        Ok(drivers.into_iter().find(|d| d.id == id))
    }

    /// Overwrite the status of a registration.
    ///
    /// Setting the status a driver already has is a silent overwrite.
    pub async fn set_driver_status(
        &self,
        id: &str,
        status: DriverStatus,
    ) -> Result<DriverRecord, AppError> {
        self.drivers
            .update(|drivers| {
                let driver = drivers
                    .iter_mut()
                    .find(|d| d.id == id)
                    .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;
                driver.status = status;
                Ok(driver.clone())
            })
            .await
    }

    // ==================== BUS OPERATIONS ====================

    /// Append a new bus.
    pub async fn add_bus(&self, new: NewBus) -> Result<BusRecord, AppError> {
        let bus = BusRecord {
            id: new_record_id(),
            driver_id: new.driver_id,
            bus_number: new.bus_number,
            start_point: new.start_point,
            end_point: new.end_point,
            stops: new.stops,
            times: new.times,
            photo: new.photo,
            created_at: Utc::now().to_rfc3339(),
        };

        let stored = bus.clone();
        self.buses
            .update(move |buses| {
                buses.push(stored);
                Ok(())
            })
            .await?;

        Ok(bus)
    }

    /// List buses registered by a driver.
    pub async fn list_buses_for_driver(
        &self,
        driver_id: &str,
    ) -> Result<Vec<BusRecord>, AppError> {
        let buses = self.buses.load().await?;
        Ok(buses
            .into_iter()
            .filter(|b| b.driver_id == driver_id)
            .collect())
    }

    /// Remove the first bus with the given ID.
    pub async fn delete_bus(&self, bus_id: &str) -> Result<BusRecord, AppError> {
        self.buses
            .update(|buses| {
                let index = buses
                    .iter()
                    .position(|b| b.id == bus_id)
                    .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))?;
                Ok(buses.remove(index))
            })
            .await
    }

    /// Buses running exactly from `from` to `to`.
    pub async fn search_buses(&self, from: &str, to: &str) -> Result<Vec<BusRecord>, AppError> {
        let buses = self.buses.load().await?;
        Ok(buses
            .into_iter()
            .filter(|b| b.serves_route(from, to))
            .collect())
    }
}

/// Time-ordered, collision-resistant record identifier.
fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
