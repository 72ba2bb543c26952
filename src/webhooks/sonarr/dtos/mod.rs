pub mod sonarr_webhook_dto;
