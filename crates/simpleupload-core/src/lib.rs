//! SimpleUpload Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain** - filename normalization, directory suggestion, the upload workflow state machine
//! - **Use cases** - `UploadWorkflow`, which drives select → upload → move
//! - **Port definitions** - Traits for adapters: `IUploadApi`, `ISettingsStore`, `INotificationService`
//! - **Configuration** - YAML-backed settings (server endpoint, upload key, logging)
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
