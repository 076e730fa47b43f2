mod device_code;
mod pagination;
mod shipment;
